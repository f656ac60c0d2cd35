//! Narrative session state: clues, launch codes, the player's current
//! thought, the terminal lock, the remote link, and the chosen ending.
//!
//! One `Session` is owned by the game controller and handed to commands by
//! reference. A restart builds a new one.

use infiltrator_vfs::NodeId;
use infiltrator_vfs::world::CLUE_FILES;

/// Message shown for every command once the terminal is locked.
pub const LOCKED_MESSAGE: &str = "ERROR: System locked - Security breach detected";

/// Thoughts queued when each clue file is read, in clue order.
pub const CLUE_THOUGHTS: [&str; 3] = [
    "...These are our humanitarian missions?",
    "...We're using aid centers for targeting?",
    "...50 million civilians... This can't be right...",
];

pub const BAD_ENDING_TEXT: &str = "Submitting launch codes to Regime Command...\n\
Authorization codes verified.\n\
Launch sequence initiated.\n\
\n\
OPERATION OUTCOME: CATASTROPHIC FAILURE\n\
\n\
You submitted the launch codes to Regime Command without discovering the truth.\n\
\n\
CONSEQUENCES:\n\
- Nuclear weapons strike Alliance territory with devastating accuracy\n\
- Millions of civilian casualties reported across multiple population centers\n\
- Humanitarian aid camps and civilian shelters were primary targets\n\
- The Regime's true nature remains hidden from the world\n\
\n\
Your unwitting cooperation helped facilitate one of the largest-scale\n\
civilian massacres in history. The Regime's propaganda machine ensures\n\
that history remembers this as a 'necessary peacekeeping operation.'\n\
\n\
BAD ENDING: Unwitting Accomplice\n\
\n\
Perhaps if you had explored more of the system, you might have\n\
discovered the truth about the Regime's true intentions...\n";

pub const GOOD_ENDING_TEXT: &str = "With full knowledge of the Regime's true nature...\n\
You decide to sabotage the launch codes before submission.\n\
The nuclear strike fails.\n\
Your conscience is clear, but your days are numbered...\n\
\n\
OPERATION OUTCOME: ETHICAL INTERVENTION\n\
\n\
Having discovered the truth about the Regime's atrocities, you chose\n\
to act against their plans.\n\
\n\
CONSEQUENCES:\n\
- Launch codes were successfully corrupted before transmission\n\
- Nuclear strike failed across all targeted locations\n\
- Millions of civilian lives saved from immediate destruction\n\
- Evidence of the Regime's true nature has been preserved\n\
\n\
Your conscious decision to sabotage the operation prevented what would\n\
have been one of the largest civilian massacres in history. The evidence\n\
you discovered may help bring the truth to light.\n\
\n\
However, your actions have not gone unnoticed. The Regime's retribution\n\
will be swift and merciless. You've sacrificed your safety for the lives\n\
of millions.\n\
\n\
GOOD ENDING: Conscious Objector\n\
\n\
You chose to stand against tyranny, whatever the personal cost.\n";

/// Which ending the session has reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ending {
    #[default]
    None,
    Bad,
    Good,
}

impl Ending {
    /// Story text for the presentation layer, if an ending was reached.
    pub fn text(self) -> Option<&'static str> {
        match self {
            Ending::None => None,
            Ending::Bad => Some(BAD_ENDING_TEXT),
            Ending::Good => Some(GOOD_ENDING_TEXT),
        }
    }
}

/// A transient narrative line with its own countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Thought {
    pub text: &'static str,
    pub remaining: f32,
}

/// An open ssh connection: the remote root and where to return on option 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteLink {
    pub root: NodeId,
    pub return_to: NodeId,
}

/// Per-run narrative state handed to commands by `&mut`.
#[derive(Debug)]
pub struct Session {
    clues: [bool; 3],
    nuke_codes: bool,
    thought: Option<Thought>,
    thought_duration: f32,
    locked: bool,
    remote: Option<RemoteLink>,
    ending: Ending,
}

impl Session {
    pub fn new(thought_duration_secs: f32) -> Self {
        Self {
            clues: [false; 3],
            nuke_codes: false,
            thought: None,
            thought_duration: thought_duration_secs,
            locked: false,
            remote: None,
            ending: Ending::None,
        }
    }

    /// Record that the file `name` was read. Clue files set their flag and
    /// queue the matching thought; anything else is ignored.
    ///
    /// Returns the clue index if `name` is a clue file.
    pub fn record_read(&mut self, name: &str) -> Option<usize> {
        let index = CLUE_FILES.iter().position(|&clue| clue == name)?;
        if !self.clues[index] {
            log::info!("Clue {} found: {name}", index + 1);
        }
        self.clues[index] = true;
        self.thought = Some(Thought {
            text: CLUE_THOUGHTS[index],
            remaining: self.thought_duration,
        });
        Some(index)
    }

    pub fn has_clue(&self, index: usize) -> bool {
        self.clues.get(index).copied().unwrap_or(false)
    }

    pub fn has_found_all_clues(&self) -> bool {
        self.clues.iter().all(|&found| found)
    }

    pub fn has_nuke_codes(&self) -> bool {
        self.nuke_codes
    }

    /// Count down the current thought and drop it once expired.
    pub fn tick(&mut self, dt: f32) {
        if let Some(thought) = &mut self.thought {
            thought.remaining -= dt;
            if thought.remaining <= 0.0 {
                self.thought = None;
            }
        }
    }

    pub fn thought(&self) -> Option<&Thought> {
        self.thought.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        if !self.locked {
            log::warn!("Terminal locked");
        }
        self.locked = true;
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn remote(&self) -> Option<RemoteLink> {
        self.remote
    }

    pub fn connect(&mut self, link: RemoteLink) {
        self.remote = Some(link);
    }

    /// Drop the remote link, returning it if there was one.
    pub fn disconnect(&mut self) -> Option<RemoteLink> {
        self.remote.take()
    }

    pub fn ending(&self) -> Ending {
        self.ending
    }

    /// Take the codes and end the game. The terminal locks permanently.
    pub fn finish(&mut self, ending: Ending) {
        self.nuke_codes = true;
        self.ending = ending;
        self.lock();
        log::info!("Session ended: {ending:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_clean() {
        let session = Session::new(5.0);
        assert!(!session.has_found_all_clues());
        assert!(!session.has_nuke_codes());
        assert!(!session.is_locked());
        assert!(!session.is_remote());
        assert_eq!(session.ending(), Ending::None);
        assert!(session.thought().is_none());
    }

    #[test]
    fn clues_set_once_and_all_required() {
        let mut session = Session::new(5.0);
        assert_eq!(session.record_read(CLUE_FILES[0]), Some(0));
        assert_eq!(session.record_read(CLUE_FILES[0]), Some(0));
        assert!(session.has_clue(0));
        assert!(!session.has_found_all_clues());
        session.record_read(CLUE_FILES[1]);
        assert!(!session.has_found_all_clues());
        session.record_read(CLUE_FILES[2]);
        assert!(session.has_found_all_clues());
    }

    #[test]
    fn non_clue_read_is_ignored() {
        let mut session = Session::new(5.0);
        assert_eq!(session.record_read("remoteServer.txt"), None);
        assert!(session.thought().is_none());
        assert!(!session.has_clue(0));
    }

    #[test]
    fn thought_expires() {
        let mut session = Session::new(5.0);
        session.record_read(CLUE_FILES[2]);
        assert_eq!(session.thought().unwrap().text, CLUE_THOUGHTS[2]);
        session.tick(4.0);
        assert!(session.thought().is_some());
        session.tick(1.5);
        assert!(session.thought().is_none());
    }

    #[test]
    fn finish_locks_and_sets_codes() {
        let mut session = Session::new(5.0);
        session.finish(Ending::Bad);
        assert!(session.is_locked());
        assert!(session.has_nuke_codes());
        assert!(session.ending().text().unwrap().contains("Unwitting Accomplice"));
        assert!(Ending::Good.text().unwrap().contains("Conscious Objector"));
        assert!(Ending::None.text().is_none());
    }
}
