//! Release progress tracking.

use std::fmt;

/// A release step that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    /// Working tree inspection
    CleanCheck,
    /// Output clearing and packaging
    Build,
    /// Local tag creation and push
    Tag,
    /// Release record creation
    Publish,
    /// Artifact upload
    Upload,
}

impl ReleaseStep {
    /// Step name as shown in error messages
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseStep::CleanCheck => "clean-check",
            ReleaseStep::Build => "build",
            ReleaseStep::Tag => "tag",
            ReleaseStep::Publish => "publish",
            ReleaseStep::Upload => "upload",
        }
    }
}

impl fmt::Display for ReleaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase of the release operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePhase {
    /// Nothing done yet
    Start,
    /// Working tree verified clean
    CleanChecked,
    /// Artifacts built
    Built,
    /// Tag created and pushed
    Tagged,
    /// Release record created
    Published,
    /// Uploading the artifact at this index
    Uploading(usize),
    /// Every artifact uploaded
    Done,
    /// Aborted during this step; terminal
    Failed(ReleaseStep),
}

impl ReleasePhase {
    /// The step that runs next from this phase, if any
    pub fn next_step(self) -> Option<ReleaseStep> {
        match self {
            ReleasePhase::Start => Some(ReleaseStep::CleanCheck),
            ReleasePhase::CleanChecked => Some(ReleaseStep::Build),
            ReleasePhase::Built => Some(ReleaseStep::Tag),
            ReleasePhase::Tagged => Some(ReleaseStep::Publish),
            ReleasePhase::Published | ReleasePhase::Uploading(_) => Some(ReleaseStep::Upload),
            ReleasePhase::Done | ReleasePhase::Failed(_) => None,
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(self) -> bool {
        matches!(self, ReleasePhase::Done | ReleasePhase::Failed(_))
    }

    /// Whether moving to `next` follows the release order
    pub fn can_advance_to(self, next: ReleasePhase) -> bool {
        use ReleasePhase::*;

        match (self, next) {
            (_, Failed(_)) => !self.is_terminal(),
            (Start, CleanChecked)
            | (CleanChecked, Built)
            | (Built, Tagged)
            | (Tagged, Published)
            | (Published, Uploading(0))
            | (Published, Done) => true,
            (Uploading(current), Uploading(following)) => following == current + 1,
            (Uploading(_), Done) => true,
            _ => false,
        }
    }
}
