//! Lightbox state: cyclic image navigation and the share action.

use crate::contact::whatsapp_share_link;
use crate::project::Project;

/// Capability for the platform-native share sheet, when one exists.
///
/// Invocation is best-effort: a failure (user dismissed the sheet,
/// platform error) is swallowed by the lightbox rather than surfaced.
pub trait NativeShare {
    fn share(&self, title: &str, text: &str, url: &str) -> Result<(), ShareFailed>;
}

/// Opaque failure from a native share attempt.
#[derive(Debug, thiserror::Error)]
#[error("native share failed")]
pub struct ShareFailed;

/// How a share request was dispatched.
#[derive(Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the native share sheet.
    Native,
    /// No native capability; the caller should open this WhatsApp link.
    Fallback(String),
}

/// Focused view over one project's image sequence.
///
/// Holds a current-image index that wraps in both directions. Closing
/// the lightbox is the caller's concern; no state persists.
#[derive(Debug)]
pub struct Lightbox<'a> {
    project: &'a Project,
    current: usize,
}

impl<'a> Lightbox<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            current: 0,
        }
    }

    pub fn project(&self) -> &Project {
        self.project
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// URL of the currently displayed image.
    pub fn current_image(&self) -> &str {
        &self.project.images[self.current]
    }

    /// Advance to the next image, wrapping from the last to the first.
    ///
    /// A project with no images (which the upload pipeline never
    /// produces) leaves the index at zero.
    pub fn next(&mut self) {
        if self.project.images.is_empty() {
            return;
        }
        self.current = if self.current == self.project.images.len() - 1 {
            0
        } else {
            self.current + 1
        };
    }

    /// Go back one image, wrapping from the first to the last.
    pub fn prev(&mut self) {
        if self.project.images.is_empty() {
            return;
        }
        self.current = if self.current == 0 {
            self.project.images.len() - 1
        } else {
            self.current - 1
        };
    }

    /// Share the project: native sheet when available, WhatsApp link
    /// otherwise. A failed native attempt is logged and dropped, never
    /// escalated to the fallback.
    pub fn share(&self, native: Option<&dyn NativeShare>, page_url: &str) -> ShareOutcome {
        let text = share_message(self.project, page_url);
        match native {
            Some(sheet) => {
                if sheet
                    .share(&self.project.event_title, &text, page_url)
                    .is_err()
                {
                    tracing::debug!("native share cancelled or failed");
                }
                ShareOutcome::Native
            }
            None => ShareOutcome::Fallback(whatsapp_share_link(&text)),
        }
    }
}

/// Build the share-message text for a project and the page it lives on.
pub fn share_message(project: &Project, page_url: &str) -> String {
    format!(
        "Check out {} by LightWave Production!\n\n{}\n\nLocation: {}\nDate: {}\n{}",
        project.event_title,
        project.short_description,
        project.event_location,
        project.event_date.format("%d/%m/%Y"),
        page_url,
    )
}
