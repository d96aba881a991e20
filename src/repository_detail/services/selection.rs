use crate::repository_detail::domain::{ImageId, Tag};

/// Popup visibility and the selections they inspect.
///
/// Opening a popup records its selection before showing it. Closing only
/// hides it; the recorded selection stays until the next open.
#[derive(Debug, Clone)]
pub struct SelectionState {
    can_manage_builds: bool,
    current_build_id: Option<String>,
    show_build_detail_popup: bool,
    show_new_build_popup: bool,
    current_tag: Option<Tag>,
    selected_image_id: Option<ImageId>,
    show_tag_security_popup: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            can_manage_builds: true,
            current_build_id: None,
            show_build_detail_popup: false,
            show_new_build_popup: false,
            current_tag: None,
            selected_image_id: None,
            show_tag_security_popup: false,
        }
    }

    /// Viewer permission, driven by the session's permission broadcast
    pub fn set_can_manage_builds(&mut self, allowed: bool) {
        self.can_manage_builds = allowed;
    }

    pub fn can_manage_builds(&self) -> bool {
        self.can_manage_builds
    }

    /// Opens the build detail popup for `build_id`.
    ///
    /// Returns `false` without touching any state when the viewer lacks
    /// permission.
    pub fn open_build_detail(&mut self, build_id: &str) -> bool {
        if !self.can_manage_builds {
            return false;
        }
        self.current_build_id = Some(build_id.to_string());
        self.show_build_detail_popup = true;
        true
    }

    pub fn close_build_detail(&mut self) {
        self.show_build_detail_popup = false;
    }

    pub fn open_new_build(&mut self) {
        self.show_new_build_popup = true;
    }

    pub fn close_new_build(&mut self) {
        self.show_new_build_popup = false;
    }

    pub fn open_tag_security(&mut self, tag: &Tag) {
        self.current_tag = Some(tag.clone());
        self.selected_image_id = Some(tag.image_id().clone());
        self.show_tag_security_popup = true;
    }

    pub fn close_tag_security(&mut self) {
        self.show_tag_security_popup = false;
    }

    pub fn current_build_id(&self) -> Option<&str> {
        self.current_build_id.as_deref()
    }

    pub fn show_build_detail_popup(&self) -> bool {
        self.show_build_detail_popup
    }

    pub fn show_new_build_popup(&self) -> bool {
        self.show_new_build_popup
    }

    pub fn current_tag(&self) -> Option<&Tag> {
        self.current_tag.as_ref()
    }

    pub fn selected_image_id(&self) -> Option<&ImageId> {
        self.selected_image_id.as_ref()
    }

    pub fn show_tag_security_popup(&self) -> bool {
        self.show_tag_security_popup
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
