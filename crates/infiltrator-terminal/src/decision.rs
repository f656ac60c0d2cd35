//! The launch-codes decision dialog.

use infiltrator_vfs::world::CODES_TEXT;

/// A choice in the launch-codes dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// 1: hand the codes to Regime Command.
    SubmitCodes,
    /// 2: close the dialog and leave the remote server.
    KeepExploring,
    /// 3: send sabotaged codes. Only offered once every clue is found.
    SubmitModified,
}

impl Decision {
    /// Map a number key to its option.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Decision::SubmitCodes),
            '2' => Some(Decision::KeepExploring),
            '3' => Some(Decision::SubmitModified),
            _ => None,
        }
    }
}

/// Dialog text: the codes, the briefing, and the numbered options.
pub fn decision_prompt(allow_modified: bool) -> String {
    let mut text = format!(
        "{CODES_TEXT}Target Coordinates: [CLASSIFIED]\n\
         Launch Window: IMMEDIATE\n\
         \n\
         What would you like to do?\n\
         \n\
         1: Submit codes to Regime Command\n\
         2: Continue exploring the system"
    );
    if allow_modified {
        text.push_str("\n3: Send modified launch codes");
    }
    text.push_str("\n\nPress number key to choose");
    text
}
