use crate::catalog::Subject;
use strum::{Display as StrumDisplay, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, StrumDisplay)]
pub enum ViewContext {
    #[default]
    #[strum(to_string = "Menu")]
    MainMenu,
    Settings,
    #[strum(to_string = "My Five")]
    MyFive,
    #[strum(to_string = "My Five")]
    MyFiveAuth,
    Friends,
    #[strum(to_string = "Friends List")]
    FriendsList,
    #[strum(to_string = "Daily Drop")]
    DailyDrop,
    #[strum(to_string = "Today's Playlist")]
    TodaysPlaylist,
    About,
    #[strum(to_string = "Privacy Policy")]
    PrivacyPolicy,
    #[strum(to_string = "Now Playing")]
    Music,
}

impl ViewContext {
    /// Contexts whose lists come from a load rather than from the menu tables.
    pub fn needs_load(&self) -> bool {
        matches!(
            self,
            Self::MyFive | Self::FriendsList | Self::TodaysPlaylist
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: FrameId,
    pub context: ViewContext,
    pub selection: usize,
    pub subject: Subject,
}

/// Navigation history as an explicit stack. The bottom frame is always
/// `MainMenu` and is never popped.
#[derive(Debug, Clone)]
pub struct ViewStack {
    frames: Vec<Frame>,
    next_id: u64,
}

impl Default for ViewStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStack {
    pub fn new() -> Self {
        let mut stack = Self {
            frames: Vec::with_capacity(4),
            next_id: 0,
        };
        let root = stack.frame(ViewContext::MainMenu, Subject::Own);
        stack.frames.push(root);
        stack
    }

    fn frame(&mut self, context: ViewContext, subject: Subject) -> Frame {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        Frame {
            id,
            context,
            selection: 0,
            subject,
        }
    }

    pub fn active(&self) -> ViewContext {
        self.active_frame().context
    }

    pub fn active_frame(&self) -> &Frame {
        // never empty: the root is pushed in new() and never popped
        &self.frames[self.frames.len() - 1]
    }

    pub fn active_frame_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.frames.iter_mut()
    }

    pub fn contains(&self, id: FrameId) -> bool {
        self.frames.iter().any(|f| f.id == id)
    }

    pub fn selection(&self) -> usize {
        self.active_frame().selection
    }

    /// Remembered index of the topmost frame showing `context`, if any.
    pub fn selection_of(&self, context: ViewContext) -> Option<usize> {
        self.frames
            .iter()
            .rev()
            .find(|f| f.context == context)
            .map(|f| f.selection)
    }

    /// Pushes `context` with its selection at the first item. Entering the
    /// main menu unwinds to the root instead.
    pub fn enter(&mut self, context: ViewContext, subject: Subject) -> FrameId {
        if context == ViewContext::MainMenu {
            self.reset();
            return self.active_frame().id;
        }
        let frame = self.frame(context, subject);
        let id = frame.id;
        log::debug!("enter {} (depth {})", context, self.frames.len() + 1);
        self.frames.push(frame);
        id
    }

    /// Returns to the immediate parent, whose selection is left as it was.
    pub fn exit(&mut self) -> Option<Frame> {
        if self.frames.len() <= 1 {
            return None;
        }
        let popped = self.frames.pop();
        log::debug!("exit to {}", self.active());
        popped
    }

    pub fn exit_to_main(&mut self) {
        self.frames.truncate(1);
    }

    pub fn reset(&mut self) {
        self.frames.truncate(1);
        self.frames[0].selection = 0;
    }
}
