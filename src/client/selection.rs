// Selection state with the mutual-exclusivity rules

use super::models::FormatCategory;

/// Current format selection: at most one combined id, or at most one
/// video-only plus one audio-only id. The invariant is enforced on this
/// structure itself, never re-derived from the rendered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    combined: Option<String>,
    video: Option<String>,
    audio: Option<String>,
}

impl SelectionState {
    /// React to a selection toggle. Selecting an already selected id
    /// deselects it; otherwise the id takes its category slot and any
    /// conflicting slots are cleared:
    /// - a combined selection clears video and audio,
    /// - a video or audio selection clears combined.
    pub fn toggle(&mut self, category: FormatCategory, format_id: &str) {
        let slot = self.slot_mut(category);
        if slot.as_deref() == Some(format_id) {
            *slot = None;
            return;
        }
        *slot = Some(format_id.to_string());

        match category {
            FormatCategory::Combined => {
                self.video = None;
                self.audio = None;
            }
            FormatCategory::VideoOnly | FormatCategory::AudioOnly => {
                self.combined = None;
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_selected(&self, format_id: &str) -> bool {
        self.combined.as_deref() == Some(format_id)
            || self.video.as_deref() == Some(format_id)
            || self.audio.as_deref() == Some(format_id)
    }

    pub fn has_selection(&self) -> bool {
        self.combined.is_some() || self.video.is_some() || self.audio.is_some()
    }

    /// Derive the backend-consumable format identifier. Priority:
    /// combined id verbatim; else video+audio joined with `+`; else the
    /// single selected id. `None` means the download must not proceed.
    pub fn format_id(&self) -> Option<String> {
        if let Some(combined) = &self.combined {
            return Some(combined.clone());
        }
        match (&self.video, &self.audio) {
            (Some(v), Some(a)) => Some(format!("{}+{}", v, a)),
            (Some(v), None) => Some(v.clone()),
            (None, Some(a)) => Some(a.clone()),
            (None, None) => None,
        }
    }

    /// Extension appended to the suggested filename: mp3 only when the
    /// selection is audio alone.
    pub fn suggested_extension(&self) -> &'static str {
        if self.combined.is_none() && self.video.is_none() && self.audio.is_some() {
            "mp3"
        } else {
            "mp4"
        }
    }

    fn slot_mut(&mut self, category: FormatCategory) -> &mut Option<String> {
        match category {
            FormatCategory::Combined => &mut self.combined,
            FormatCategory::VideoOnly => &mut self.video,
            FormatCategory::AudioOnly => &mut self.audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut state = SelectionState::default();
        state.toggle(FormatCategory::Combined, "18");
        assert!(state.is_selected("18"));
        assert!(state.has_selection());

        state.toggle(FormatCategory::Combined, "18");
        assert!(!state.is_selected("18"));
        assert!(!state.has_selection());
    }

    #[test]
    fn test_combined_clears_video_and_audio() {
        let mut state = SelectionState::default();
        state.toggle(FormatCategory::VideoOnly, "137");
        state.toggle(FormatCategory::AudioOnly, "140");
        assert_eq!(state.format_id().as_deref(), Some("137+140"));

        state.toggle(FormatCategory::Combined, "18");
        assert!(state.is_selected("18"));
        assert!(!state.is_selected("137"));
        assert!(!state.is_selected("140"));
        assert_eq!(state.format_id().as_deref(), Some("18"));
    }

    #[test]
    fn test_video_or_audio_clears_combined() {
        let mut state = SelectionState::default();
        state.toggle(FormatCategory::Combined, "18");
        state.toggle(FormatCategory::VideoOnly, "137");
        assert!(!state.is_selected("18"));
        assert_eq!(state.format_id().as_deref(), Some("137"));

        state.toggle(FormatCategory::Combined, "22");
        state.toggle(FormatCategory::AudioOnly, "140");
        assert!(!state.is_selected("22"));
        assert_eq!(state.format_id().as_deref(), Some("140"));
    }

    #[test]
    fn test_same_category_replaces() {
        let mut state = SelectionState::default();
        state.toggle(FormatCategory::VideoOnly, "137");
        state.toggle(FormatCategory::VideoOnly, "136");
        assert!(!state.is_selected("137"));
        assert!(state.is_selected("136"));
    }

    #[test]
    fn test_format_id_priority() {
        let mut state = SelectionState::default();
        assert_eq!(state.format_id(), None);

        state.toggle(FormatCategory::AudioOnly, "140");
        assert_eq!(state.format_id().as_deref(), Some("140"));

        state.toggle(FormatCategory::VideoOnly, "137");
        assert_eq!(state.format_id().as_deref(), Some("137+140"));

        state.toggle(FormatCategory::Combined, "18");
        assert_eq!(state.format_id().as_deref(), Some("18"));
    }

    #[test]
    fn test_suggested_extension() {
        let mut state = SelectionState::default();
        assert_eq!(state.suggested_extension(), "mp4");

        state.toggle(FormatCategory::AudioOnly, "140");
        assert_eq!(state.suggested_extension(), "mp3");

        state.toggle(FormatCategory::VideoOnly, "137");
        assert_eq!(state.suggested_extension(), "mp4");

        state.clear();
        state.toggle(FormatCategory::Combined, "18");
        assert_eq!(state.suggested_extension(), "mp4");
    }
}
