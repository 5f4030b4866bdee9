use std::{mem, time::Duration};

use log::{info, warn};

use trellis_shared::{
    AuthMethod, Command, EntityEvent, NodeId, OutgoingCommand, TerminateReason,
};

use crate::{
    auth::Authenticator,
    bootstrap::BootstrapPolicy,
    client_config::ClientConfig,
    error::SessionError,
    transport::{CommandSender, EventReceiver, TransportError},
    world::registry::EntityRegistry,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Connected,
    Disconnecting,
    Disconnected,
}

/// A single connection's view of the server: its state machine, its
/// credentials, and the mirror it keeps.
///
/// The caller owns the loop. Call [`MirrorSession::update`] once per
/// [`MirrorSession::tick_interval`] until [`MirrorSession::is_running`]
/// turns false.
pub struct MirrorSession {
    config: ClientConfig,
    state: SessionState,
    registry: EntityRegistry,
    authenticator: Box<dyn Authenticator>,
    outgoing: Vec<OutgoingCommand>,
    out_queue_size: Option<u32>,
    terminate_reason: Option<TerminateReason>,
}

impl MirrorSession {
    pub fn new(
        config: ClientConfig,
        policy: Box<dyn BootstrapPolicy>,
        authenticator: Box<dyn Authenticator>,
    ) -> Self {
        let mut registry = EntityRegistry::with_policy(policy);
        registry.set_priority(config.priority);

        info!(
            "{} {} connecting to {}:{}",
            config.client_name, config.client_version, config.host, config.service
        );

        Self {
            config,
            state: SessionState::Connecting,
            registry,
            authenticator,
            outgoing: Vec::new(),
            out_queue_size: None,
            terminate_reason: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != SessionState::Disconnected
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    pub fn terminate_reason(&self) -> Option<TerminateReason> {
        self.terminate_reason
    }

    /// The mirror, once the server has accepted the connection.
    pub fn registry(&self) -> Option<&EntityRegistry> {
        self.is_accepted().then_some(&self.registry)
    }

    pub fn registry_mut(&mut self) -> Option<&mut EntityRegistry> {
        if self.is_accepted() {
            Some(&mut self.registry)
        } else {
            None
        }
    }

    fn is_accepted(&self) -> bool {
        match self.state {
            SessionState::Connected | SessionState::Disconnecting => {
                self.registry.identity().is_assigned()
            }
            SessionState::Connecting | SessionState::Disconnected => false,
        }
    }

    pub fn avatar_id(&self) -> Option<NodeId> {
        self.registry().and_then(EntityRegistry::avatar_id)
    }

    /// Records the outbound queue size the server advertised and returns
    /// the size this client asks for instead.
    pub fn negotiate_queue_size(&mut self, advertised: u32) -> u32 {
        let size = self.config.adjusted_queue_size(advertised);
        info!("Outbound queue size {} -> {}", advertised, size);
        self.out_queue_size = Some(size);
        size
    }

    pub fn out_queue_size(&self) -> Option<u32> {
        self.out_queue_size
    }

    // Incoming

    /// Applies one event and returns the commands it calls for.
    pub fn receive(&mut self, event: EntityEvent) -> Vec<OutgoingCommand> {
        match event {
            EntityEvent::UserAuthenticateChallenge { username, methods } => {
                self.on_authenticate_challenge(&username, &methods)
            }
            EntityEvent::ConnectAccept { .. } => {
                match self.state {
                    SessionState::Connecting => {}
                    SessionState::Connected => {
                        warn!("Connect accept received while already connected");
                    }
                    SessionState::Disconnecting | SessionState::Disconnected => {
                        warn!("Ignoring connect accept while {:?}", self.state);
                        return Vec::new();
                    }
                }
                self.state = SessionState::Connected;
                self.terminate_reason = None;

                let mut commands = vec![Command::Fps {
                    fps: self.config.fps,
                }
                .with_priority(self.config.priority)];
                commands.extend(self.registry.handle_event(event));
                commands
            }
            EntityEvent::ConnectTerminate { reason } => {
                self.registry.handle_event(event);
                self.terminate(reason);
                Vec::new()
            }
            event => {
                if self.registry().is_none() {
                    warn!("Dropping {} while {:?}", event.log(), self.state);
                    return Vec::new();
                }
                self.registry.handle_event(event)
            }
        }
    }

    fn on_authenticate_challenge(
        &mut self,
        username: &str,
        methods: &[AuthMethod],
    ) -> Vec<OutgoingCommand> {
        match self.authenticator.authenticate(username, methods) {
            Some(reply) => vec![reply.to_command().with_priority(self.config.priority)],
            None => {
                warn!(
                    "Unsupported authentication methods {:?} for user '{}'",
                    methods, username
                );
                Vec::new()
            }
        }
    }

    // Outgoing

    /// Queues a command for the next [`MirrorSession::update`].
    pub fn queue_command(&mut self, command: Command) -> Result<(), SessionError> {
        if self.state != SessionState::Connected {
            return Err(SessionError::NotConnected);
        }
        self.outgoing
            .push(command.with_priority(self.config.priority));
        Ok(())
    }

    /// Asks the server to close the connection. The mirror stays readable
    /// until the server confirms.
    pub fn disconnect(&mut self) {
        match self.state {
            SessionState::Connecting | SessionState::Connected => {
                info!("Terminating connection ...");
                self.outgoing
                    .push(Command::TerminateConnection.with_priority(self.config.priority));
                self.state = SessionState::Disconnecting;
            }
            SessionState::Disconnecting | SessionState::Disconnected => {}
        }
    }

    pub fn take_outgoing(&mut self) -> Vec<OutgoingCommand> {
        mem::take(&mut self.outgoing)
    }

    // Tick

    /// Runs one tick: applies every pending event in arrival order, then
    /// sends everything queued. An accepted connection also negotiates the
    /// outbound queue size the receiver reports.
    ///
    /// A transport failure tears the mirror down and is returned; it is the
    /// only error that ends the session.
    pub fn update(
        &mut self,
        receiver: &mut dyn EventReceiver,
        sender: &mut dyn CommandSender,
    ) -> Result<(), SessionError> {
        if self.state == SessionState::Disconnected {
            return Err(match self.terminate_reason {
                Some(reason) => SessionError::Terminated(reason),
                None => SessionError::NotConnected,
            });
        }

        while self.is_running() {
            match receiver.receive() {
                Ok(Some(event)) => {
                    let accept = matches!(event, EntityEvent::ConnectAccept { .. });
                    let commands = self.receive(event);
                    self.outgoing.extend(commands);

                    if accept && self.state == SessionState::Connected {
                        if let Some(advertised) = receiver.advertised_queue_size() {
                            self.negotiate_queue_size(advertised);
                        }
                    }
                }
                Ok(None) => break,
                Err(error) => return Err(self.fail(error)),
            }
        }

        for command in self.take_outgoing() {
            if let Err(error) = sender.send(command) {
                return Err(self.fail(error));
            }
        }
        Ok(())
    }

    fn terminate(&mut self, reason: TerminateReason) {
        info!("Session disconnected: {}", reason);
        self.registry.teardown();
        self.outgoing.clear();
        self.state = SessionState::Disconnected;
        self.terminate_reason = Some(reason);
    }

    fn fail(&mut self, error: TransportError) -> SessionError {
        warn!("Transport failure, tearing down mirror: {}", error);
        self.terminate(TerminateReason::Error);
        SessionError::Transport(error)
    }
}
