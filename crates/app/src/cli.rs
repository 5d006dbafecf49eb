//! Argument parsing for the `partner-onboarding` binary

/// Usage text shown for `help` and argument errors
pub const USAGE: &str = "\
Usage:
  partner-onboarding onboard <account_name>
  partner-onboarding verify <child_account_id> <onboarding_id> <account_id>

Configuration is read from PARTNER_ONBOARDING_* environment variables
(a .env file is honoured) or from config.{json,toml}.";

/// A parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the onboarding chain for a new customer.
    Onboard {
        /// Customer name, before any configured suffix.
        account_name: String,
    },
    /// Check that a customer completed a previous onboarding.
    Verify {
        /// Child account returned by `onboard`.
        child_account_id: String,
        /// Onboarding session returned by `onboard`.
        onboarding_id: String,
        /// The customer's infrastructure account.
        account_id: String,
    },
    /// Print usage.
    Help,
}

impl Command {
    /// Parse arguments that follow the program name.
    ///
    /// A multi-word account name may be passed unquoted; the words are joined
    /// with single spaces.
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(command) = args.next() else {
            return Err("missing command".to_string());
        };
        let rest: Vec<String> = args.collect();

        match command.as_str() {
            "onboard" => {
                if rest.is_empty() {
                    return Err("onboard requires <account_name>".to_string());
                }
                Ok(Self::Onboard { account_name: rest.join(" ") })
            }
            "verify" => match <[String; 3]>::try_from(rest) {
                Ok([child_account_id, onboarding_id, account_id]) => {
                    Ok(Self::Verify { child_account_id, onboarding_id, account_id })
                }
                Err(_) => Err(
                    "verify requires <child_account_id> <onboarding_id> <account_id>".to_string()
                ),
            },
            "help" | "-h" | "--help" => Ok(Self::Help),
            other => Err(format!("unknown command: {other}")),
        }
    }
}
