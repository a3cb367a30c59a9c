/*
 * Error type for the setup and teardown surfaces of the crate. Event and
 * message callbacks never return errors: they run inline with the host's
 * dispatch and simply skip customizations whose preconditions fail.
 */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromeError {
    /// The system-wide lifecycle hook could not be registered.
    HookInstallFailed(String),
    /// A hook is already active in this process.
    AlreadyInstalled,
    /// A color string could not be parsed.
    InvalidColor(String),
    /// A native call failed with the given error code.
    Win32 { context: String, code: u32 },
}

impl fmt::Display for ChromeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromeError::HookInstallFailed(reason) => {
                write!(f, "failed to install menu lifecycle hook: {reason}")
            }
            ChromeError::AlreadyInstalled => write!(f, "menu lifecycle hook is already installed"),
            ChromeError::InvalidColor(input) => write!(f, "invalid color value '{input}'"),
            ChromeError::Win32 { context, code } => {
                write!(f, "{context} failed with Win32 error {code:#010x}")
            }
        }
    }
}

impl std::error::Error for ChromeError {}

pub type Result<T> = std::result::Result<T, ChromeError>;
