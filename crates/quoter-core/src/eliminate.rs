//! Removes modifier calls that do not change what a factory call renders to.

use quoter_syntax::Value;
use tracing::debug;

use crate::error::Result;
use crate::expr::Call;
use crate::interpret::Interpreter;

pub struct Eliminator<'a, 'r> {
    interpreter: &'a Interpreter<'r>,
    normalize: bool,
}

impl<'a, 'r> Eliminator<'a, 'r> {
    /// With `normalize` set, renderings are compared after whitespace normalization.
    pub fn new(interpreter: &'a Interpreter<'r>, normalize: bool) -> Self {
        Self {
            interpreter,
            normalize,
        }
    }

    /// Keeps a modifier only when adding it to the calls kept so far changes
    /// the rendered text.
    pub fn trim(&self, call: &mut Call) -> Result<()> {
        let chain = std::mem::take(&mut call.chain);
        let mut current = self.render(call)?;
        for modifier in chain {
            call.chain.push(modifier);
            let next = self.render(call)?;
            if next == current {
                if let Some(dropped) = call.chain.pop() {
                    debug!("{}: dropped redundant {}", call.head.name, dropped.name);
                }
            } else {
                current = next;
            }
        }
        Ok(())
    }

    fn render(&self, call: &Call) -> Result<String> {
        let node = match self.interpreter.call(call)? {
            Value::Node(node) => node,
            other => crate::bail!(
                "{} produced {} where a node was expected",
                call.head.name,
                other.type_name()
            ),
        };
        if self.normalize {
            Ok(node.normalize_whitespace().to_full_string())
        } else {
            Ok(node.to_full_string())
        }
    }
}
