//! The conversational side of a session.

use abpl_lang::{Interpreter, Outcome, Rejection};
use tracing::debug;

use crate::action::{ActionRequest, AssistantReply};
use crate::error::AssistantError;
use crate::history::{Role, TurnLog};

/// Produces the next reply for a transcript whose last turn is the user's.
pub trait Assistant {
    fn reply(&self, log: &TurnLog) -> Result<AssistantReply, AssistantError>;
}

/// An [`Assistant`] that answers from the interpreter alone.
///
/// Accepted sentences are acknowledged and mapped to the request they name
/// directly. Rejected sentences are explained back to the user.
#[derive(Debug, Clone)]
pub struct CommandAssistant {
    interpreter: Interpreter,
}

impl CommandAssistant {
    pub fn new(interpreter: Interpreter) -> Self {
        CommandAssistant { interpreter }
    }

    fn explain(rejection: &Rejection) -> String {
        format!(
            "I could not understand that ({} error at {}): {rejection}",
            rejection.kind(),
            rejection.position()
        )
    }
}

impl Assistant for CommandAssistant {
    fn reply(&self, log: &TurnLog) -> Result<AssistantReply, AssistantError> {
        let Some(sentence) = log
            .turns()
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
        else {
            return Ok(AssistantReply::new("How can I help?", ActionRequest::NoAction));
        };

        match self.interpreter.interpret(&sentence.content) {
            Outcome::Accepted(tree) => {
                let action = ActionRequest::try_from(&tree)?;
                debug!(shape = %tree.shape(), "accepted sentence");
                Ok(AssistantReply::new(
                    format!("Understood: {}.", tree.shape()),
                    action,
                ))
            }
            Outcome::Rejected(rejection) => Ok(AssistantReply::new(
                Self::explain(&rejection),
                ActionRequest::NoAction,
            )),
        }
    }
}
