use std::fmt;

/// Login details for an account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The account name.
    pub account_name: String,
    /// The password.
    pub password: String,
    /// The shared secret used to generate Steam Guard codes.
    pub shared_secret: String,
    /// The machine name reported when logging on.
    pub machine_name: Option<String>,
    /// The identity secret used to sign mobile confirmations.
    pub identity_secret: Option<String>,
}

impl Credentials {
    pub fn new(
        account_name: String,
        password: String,
        shared_secret: String,
    ) -> Self {
        Self {
            account_name,
            password,
            shared_secret,
            machine_name: None,
            identity_secret: None,
        }
    }

    /// Sets the machine name. Empty names are ignored.
    pub fn machine_name(mut self, machine_name: String) -> Self {
        self.machine_name = Some(machine_name).filter(|name| !name.is_empty());
        self
    }

    /// Sets the identity secret.
    pub fn identity_secret(mut self, identity_secret: String) -> Self {
        self.identity_secret = Some(identity_secret);
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_name", &self.account_name)
            .field("machine_name", &self.machine_name)
            .finish_non_exhaustive()
    }
}
