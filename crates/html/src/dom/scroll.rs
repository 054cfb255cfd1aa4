//! `scrollIntoView` options and the requests recorded against a document.
//! CSSOM View: <https://drafts.csswg.org/cssom-view/#dictdef-scrollintoviewoptions>

use indextree::NodeId;

/// CSSOM View `ScrollBehavior`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Instant,
    Smooth,
}

/// CSSOM View `ScrollLogicalPosition`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollLogicalPosition {
    Start,
    Center,
    End,
    Nearest,
}

/// CSSOM View `ScrollIntoViewOptions`. Defaults are `block: start`,
/// `inline: nearest`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollLogicalPosition,
    pub inline: ScrollLogicalPosition,
}

impl Default for ScrollIntoViewOptions {
    fn default() -> Self {
        Self {
            behavior: ScrollBehavior::Auto,
            block: ScrollLogicalPosition::Start,
            inline: ScrollLogicalPosition::Nearest,
        }
    }
}

/// One recorded `scrollIntoView` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: NodeId,
    pub options: ScrollIntoViewOptions,
}
