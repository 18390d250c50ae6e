//! Terminal capability helpers

use is_terminal::IsTerminal;

/// Whether stdin and stderr are attached to a real terminal
///
/// Prompts and spinners are suppressed otherwise.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}
