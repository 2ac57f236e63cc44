//! Validated input loops.

use crate::error::{OffboardError, Result};
use crate::principal::{is_principal_name, PrincipalName};

use super::{Prompt, UserInterface};

/// Prompt key for the principal name (`OFFBOARD_PROMPT_USER` in non-interactive mode).
pub const PRINCIPAL_PROMPT_KEY: &str = "user";

/// Pull values from `source` until one satisfies `predicate`.
///
/// `source` receives the value rejected on the previous pull (`None` on the
/// first pull) so it can explain the rejection before asking again. Returning
/// `Ok(None)` means the source is exhausted. Accepted values are returned
/// trimmed.
///
/// # Example
///
/// ```
/// use offboard::ui::read_until;
///
/// let mut answers = vec!["nope", " jdoe@contoso.com "].into_iter();
/// let value = read_until(|s| s.contains('@'), |_| Ok(answers.next().map(String::from))).unwrap();
/// assert_eq!(value, "jdoe@contoso.com");
/// ```
pub fn read_until<P, S>(predicate: P, mut source: S) -> Result<String>
where
    P: Fn(&str) -> bool,
    S: FnMut(Option<&str>) -> Result<Option<String>>,
{
    let mut rejected: Option<String> = None;
    loop {
        let Some(raw) = source(rejected.as_deref())? else {
            return Err(OffboardError::InputExhausted {
                prompt: "input".to_string(),
            });
        };
        let value = raw.trim();
        if predicate(value) {
            return Ok(value.to_string());
        }
        tracing::debug!("rejected input {:?}", value);
        rejected = Some(value.to_string());
    }
}

/// Ask for the principal name until an email-shaped value is entered.
///
/// Interactive UIs re-prompt after a warning. A non-interactive UI answers
/// from a fixed override, so an invalid answer fails immediately instead of
/// looping.
pub fn prompt_principal(ui: &mut dyn UserInterface) -> Result<PrincipalName> {
    let prompt = Prompt::input(PRINCIPAL_PROMPT_KEY, "User principal name to offboard");
    let interactive = ui.is_interactive();

    let value = read_until(is_principal_name, |rejected| {
        if let Some(bad) = rejected {
            if !interactive {
                return Err(OffboardError::InvalidPrincipal {
                    value: bad.to_string(),
                });
            }
            ui.warning(&format!(
                "'{}' is not a principal name (expected something like user@contoso.com)",
                bad
            ));
        }
        ui.prompt(&prompt).map(|answer| Some(answer.as_string()))
    })?;

    PrincipalName::parse(&value)
}
