//! Terminal rendering of the published session view.

use colored::Colorize;
use pixid_application::SessionView;
use pixid_core::config::{ContractConfig, NetworkConfig};
use pixid_core::session::Status;
use pixid_core::wallet::shorten_hex;

/// One-line header: status, wallet and target network.
pub fn status_line(view: &SessionView, network: &NetworkConfig) -> String {
    let status = match view.status {
        Status::Idle => view.status.to_string().bright_black(),
        Status::Connecting | Status::Interacting | Status::Generating => {
            view.status.to_string().bright_yellow()
        }
        Status::Success => view.status.to_string().bright_green(),
        Status::Error => view.status.to_string().bright_red(),
    };
    let wallet = view
        .short_address
        .as_deref()
        .unwrap_or("not connected");
    format!("[{}] wallet: {} | network: {}", status, wallet, network.chain_name)
}

/// Progress line shown while a flow is suspended.
pub fn progress_line(view: &SessionView) -> Option<String> {
    view.status
        .busy_label()
        .map(|label| format!("  {}", label).bright_yellow().to_string())
}

/// Full rendering of the view, one entry per printed line.
pub fn session_lines(view: &SessionView, network: &NetworkConfig, contract: &ContractConfig) -> Vec<String> {
    let mut lines = vec![status_line(view, network)];

    if let Some(progress) = progress_line(view) {
        lines.push(progress);
    }

    if let Some(result) = &view.result {
        lines.push(String::new());
        lines.push(format!("  ✦ {}", result.persona_name).bright_magenta().bold().to_string());
        lines.push(format!("    {}", result.tagline).bright_blue().to_string());
        if let Some(tx_hash) = &result.tx_hash {
            lines.push(format!("    tx: {}", shorten_hex(tx_hash.as_str())).bright_black().to_string());
        }
        lines.push(
            format!(
                "    image: {} (use /save <path> to keep it)",
                result.image.mime_type()
            )
            .bright_black()
            .to_string(),
        );
    }

    if let Some(error) = &view.error {
        lines.push(format!("  Error: {}", error).red().to_string());
        lines.push("  Try /reset to start over.".yellow().to_string());
    }

    if matches!(view.status, Status::Idle) {
        let hint = if view.is_connected() {
            format!(
                "  Ready. /interact calls {} on {}.",
                shorten_hex(&contract.address),
                network.chain_name
            )
        } else {
            "  Type /connect to link your wallet.".to_string()
        };
        lines.push(hint.bright_black().to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixid_core::FlowError;
    use pixid_core::persona::Persona;
    use pixid_core::session::{GenerationResult, ImagePayload, Session};
    use pixid_core::wallet::{TxHash, WalletAddress};

    const ADDRESS: &str = "0xABCD000000000000000000000000000000001234";

    fn render(session: &Session) -> Vec<String> {
        colored::control::set_override(false);
        session_lines(
            &SessionView::from(session),
            &NetworkConfig::default(),
            &ContractConfig::default(),
        )
    }

    #[test]
    fn test_idle_without_wallet_prompts_connect() {
        let lines = render(&Session::new());
        assert_eq!(lines[0], "[IDLE] wallet: not connected | network: Celo Mainnet");
        assert!(lines[1].contains("/connect"));
    }

    #[test]
    fn test_connected_shows_short_forms() {
        let mut session = Session::new();
        session.set_wallet_address(WalletAddress::new(ADDRESS));

        let lines = render(&session);
        assert!(lines[0].contains("0xABCD...1234"));
        assert!(lines[1].contains("0x1554...A06a"));
    }

    #[test]
    fn test_busy_status_shows_label() {
        let mut session = Session::new();
        session.enter(pixid_core::session::Phase::Generating);

        let lines = render(&session);
        assert!(lines[0].starts_with("[GENERATING]"));
        assert_eq!(lines[1].trim(), "Dreaming...");
    }

    #[test]
    fn test_success_renders_card() {
        let persona = Persona {
            name: "Celo",
            tagline: "The Eco-Friendly Builder",
        };
        let result = GenerationResult::new(&persona, ImagePayload::from_inline("image/png", "AA=="))
            .with_transaction(TxHash::new("0x9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"));
        let mut session = Session::new();
        session.succeed(result);

        let text = render(&session).join("\n");
        assert!(text.contains("✦ Celo"));
        assert!(text.contains("The Eco-Friendly Builder"));
        assert!(text.contains("tx: 0x9f86...0a08"));
        assert!(text.contains("image/png"));
    }

    #[test]
    fn test_error_renders_message_and_reset_hint() {
        let mut session = Session::new();
        session.fail(&FlowError::NoWalletFound);

        let text = render(&session).join("\n");
        assert!(text.contains(&format!("Error: {}", FlowError::NoWalletFound)));
        assert!(text.contains("/reset"));
    }
}
