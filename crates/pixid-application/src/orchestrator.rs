//! Interaction orchestrator.
//!
//! Owns the only [`Session`] and drives it through
//! `Idle → Connecting → Idle` (connect) and
//! `Idle → Interacting → Generating → Success` (interact), with every
//! failure landing in `Error`. Actions take `&mut self`, so one flow runs to
//! completion before the next can start.

use crate::view::SessionView;
use pixid_core::FlowError;
use pixid_core::session::{Phase, Session, Status};
use pixid_core::wallet::WalletAddress;
use pixid_interaction::{ChainGateway, ContentGenerator};
use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub struct InteractionOrchestrator {
    session: Session,
    chain: ChainGateway,
    generator: ContentGenerator,
    publisher: watch::Sender<SessionView>,
}

impl InteractionOrchestrator {
    pub fn new(chain: ChainGateway, generator: ContentGenerator) -> Self {
        let session = Session::new();
        let (publisher, _) = watch::channel(SessionView::from(&session));
        Self {
            session,
            chain,
            generator,
            publisher,
        }
    }

    /// Receives a fresh [`SessionView`] after every transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.publisher.subscribe()
    }

    pub fn view(&self) -> SessionView {
        SessionView::from(&self.session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> Status {
        self.session.status()
    }

    pub fn chain(&self) -> &ChainGateway {
        &self.chain
    }

    fn publish(&self) {
        self.publisher.send_replace(SessionView::from(&self.session));
    }

    fn enter(&mut self, phase: Phase) {
        let from = self.session.status();
        self.session.enter(phase);
        debug!(%from, to = %self.session.status(), "status transition");
        self.publish();
    }

    fn fail(&mut self, err: &FlowError) {
        warn!(kind = %err.kind(), error = %err, from = %self.session.status(), "interaction failed");
        self.session.fail(err);
        self.publish();
    }

    fn set_wallet_address(&mut self, address: WalletAddress) {
        self.session.set_wallet_address(address);
        self.publish();
    }

    /// Whether `action` may start from the current state.
    ///
    /// `Success` requires a reset first. A busy status is only seen here if a
    /// flow future was dropped mid-flight, and then only `reset` recovers.
    fn accepts(&self, action: &'static str) -> bool {
        let status = self.session.status();
        if status == Status::Success || status.is_busy() {
            warn!(action, %status, "action rejected in current state");
            return false;
        }
        true
    }

    /// Picks up an account the wallet already authorized, without prompting.
    ///
    /// Never enters `Error`; a wallet that cannot answer simply leaves the
    /// session unconnected.
    pub async fn restore(&mut self) {
        if self.session.wallet_address().is_some() {
            return;
        }
        if let Some(address) = self.chain.authorized_account().await {
            info!(address = %address.short(), "restored authorized wallet account");
            self.set_wallet_address(address);
        }
    }

    /// Connects the wallet and puts it on the target network.
    ///
    /// Ends in `Idle` (address set) or `Error`.
    pub async fn connect(&mut self) -> Status {
        if !self.accepts("connect") {
            return self.status();
        }

        self.enter(Phase::Connecting);
        match self.connect_and_switch().await {
            Ok(()) => self.enter(Phase::Idle),
            Err(err) => self.fail(&err),
        }
        self.status()
    }

    async fn connect_and_switch(&mut self) -> Result<(), FlowError> {
        let address = self.chain.connect().await?;
        self.set_wallet_address(address);
        self.chain.ensure_network().await
    }

    /// Runs the full flow: connect if needed, enforce the network, submit
    /// the transaction, then generate the identity.
    ///
    /// Ends in `Success` or `Error`.
    pub async fn interact(&mut self) -> Status {
        if !self.accepts("interact") {
            return self.status();
        }

        let attempt = Uuid::new_v4();
        let span = info_span!("interaction", %attempt);
        async {
            if self.session.wallet_address().is_none() {
                debug!("no wallet address yet, connecting first");
                if self.connect().await == Status::Error {
                    return;
                }
            }

            match self.submit_and_generate().await {
                Ok(()) => info!(status = %self.status(), "interaction complete"),
                Err(err) => self.fail(&err),
            }
        }
        .instrument(span)
        .await;

        self.status()
    }

    async fn submit_and_generate(&mut self) -> Result<(), FlowError> {
        let from = self
            .session
            .wallet_address()
            .cloned()
            .ok_or(FlowError::NoWalletFound)?;

        self.enter(Phase::Interacting);
        // The wallet may have switched networks since connect.
        self.chain.ensure_network().await?;
        let tx_hash = self.chain.submit_interaction(&from).await?;
        info!(%tx_hash, "transaction submitted");

        self.enter(Phase::Generating);
        let result = self.generator.generate_identity().await?;
        info!(persona = %result.persona_name, "identity revealed");

        self.session.succeed(result.with_transaction(tx_hash));
        self.publish();
        Ok(())
    }

    /// Clears any result or error and returns to `Idle`. The wallet address
    /// is kept.
    pub fn reset(&mut self) -> Status {
        self.enter(Phase::Idle);
        self.status()
    }
}
