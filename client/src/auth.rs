use trellis_shared::{AuthMethod, Command};

/// Credentials offered in answer to an authentication challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthReply {
    pub username: String,
    pub method: AuthMethod,
    pub credential: String,
}

impl AuthReply {
    pub fn to_command(&self) -> Command {
        Command::AuthenticateReply {
            username: self.username.clone(),
            method: self.method,
            credential: self.credential.clone(),
        }
    }
}

/// Answers the server's authentication challenges.
///
/// Returning `None` means none of the offered methods can be satisfied. The
/// session logs that and leaves it to the server to give up on us.
pub trait Authenticator {
    fn authenticate(&mut self, username: &str, methods: &[AuthMethod]) -> Option<AuthReply>;
}

/// A fixed username and password.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&mut self, username: &str, methods: &[AuthMethod]) -> Option<AuthReply> {
        // first round: server does not know who we are yet
        if username.is_empty() {
            return Some(AuthReply {
                username: self.username.clone(),
                method: AuthMethod::None,
                credential: String::new(),
            });
        }

        if methods.contains(&AuthMethod::Password) {
            return Some(AuthReply {
                username: username.to_string(),
                method: AuthMethod::Password,
                credential: self.password.clone(),
            });
        }

        None
    }
}
