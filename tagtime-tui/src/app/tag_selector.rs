use crossterm::event::KeyCode;
use tagtime_client::color::{normalize_or_default, DEFAULT_TAG_COLOR};
use tagtime_client::domain::{Tag, TagId};
use tagtime_client::CreateTagRequest;

/// Upper bound on dropdown rows rendered at once.
pub const MAX_VISIBLE_ROWS: usize = 5;

/// Tags chosen for the current timer session, unique by id, in the order
/// they were picked. Holds snapshots, not references into the tag list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSelection {
    tags: Vec<Tag>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|tag| tag.id.clone()).collect()
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.tags.iter().any(|tag| &tag.id == id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Append `tag` unless a tag with the same id is already selected.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(&tag.id) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove by id, returning the index the tag occupied.
    pub fn remove(&mut self, id: &TagId) -> Option<usize> {
        let index = self.tags.iter().position(|tag| &tag.id == id)?;
        self.tags.remove(index);
        Some(index)
    }
}

/// Where focus sits inside the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorFocus {
    Input,
    Options,
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOption<'a> {
    Tag(&'a Tag),
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Name,
    Color,
}

/// Draft for a tag being created inline.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTagDialog {
    pub name: String,
    pub color: String,
    pub field: DialogField,
    pub error: Option<String>,
}

impl CreateTagDialog {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: DEFAULT_TAG_COLOR.to_string(),
            field: DialogField::Name,
            error: None,
        }
    }

    /// The color the new tag will get if submitted now.
    pub fn preview_color(&self) -> String {
        normalize_or_default(Some(self.color.as_str()))
    }

    fn field_mut(&mut self) -> &mut String {
        match self.field {
            DialogField::Name => &mut self.name,
            DialogField::Color => &mut self.color,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            DialogField::Name => DialogField::Color,
            DialogField::Color => DialogField::Name,
        };
    }
}

/// Interaction state of the tag picker: search text, dropdown visibility,
/// the keyboard cursor over selected chips and the inline-creation dialog.
#[derive(Debug, Clone)]
pub struct TagSelector {
    selection: TagSelection,
    search: String,
    dropdown_visible: bool,
    active_index: Option<usize>,
    focus: Option<SelectorFocus>,
    option_index: usize,
    allow_create: bool,
    creating: bool,
    dialog: Option<CreateTagDialog>,
}

impl TagSelector {
    pub fn new(allow_create: bool) -> Self {
        Self {
            selection: TagSelection::new(),
            search: String::new(),
            dropdown_visible: false,
            active_index: None,
            focus: None,
            option_index: 0,
            allow_create,
            creating: false,
            dialog: None,
        }
    }

    pub fn selection(&self) -> &TagSelection {
        &self.selection
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn trimmed_search(&self) -> &str {
        self.search.trim()
    }

    pub fn is_dropdown_visible(&self) -> bool {
        self.dropdown_visible
    }

    /// Index of the chip under the keyboard cursor, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn focus(&self) -> Option<SelectorFocus> {
        self.focus
    }

    pub fn dialog(&self) -> Option<&CreateTagDialog> {
        self.dialog.as_ref()
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Available tags not yet selected, narrowed by the search text.
    pub fn filtered_tags<'a>(&self, available: &'a [Tag]) -> Vec<&'a Tag> {
        let query = self.trimmed_search().to_lowercase();
        available
            .iter()
            .filter(|tag| !self.selection.contains(&tag.id))
            .filter(|tag| query.is_empty() || tag.label.to_lowercase().contains(&query))
            .collect()
    }

    pub fn show_create_option(&self) -> bool {
        self.allow_create && !self.trimmed_search().is_empty()
    }

    pub fn options<'a>(&self, available: &'a [Tag]) -> Vec<SelectorOption<'a>> {
        let mut options: Vec<SelectorOption<'a>> = self
            .filtered_tags(available)
            .into_iter()
            .map(SelectorOption::Tag)
            .collect();
        if self.show_create_option() {
            options.push(SelectorOption::Create);
        }
        options
    }

    /// Rows the dropdown needs: at least one (for the empty message), at
    /// most [`MAX_VISIBLE_ROWS`].
    pub fn visible_rows(&self, available: &[Tag]) -> usize {
        self.options(available).len().clamp(1, MAX_VISIBLE_ROWS)
    }

    /// Highlighted option while focus is in the dropdown.
    pub fn highlighted_option(&self, available: &[Tag]) -> Option<usize> {
        if self.focus != Some(SelectorFocus::Options) {
            return None;
        }
        let count = self.options(available).len();
        (count > 0).then(|| self.option_index.min(count - 1))
    }

    /// Message shown instead of options when there is nothing to pick.
    pub fn empty_message(&self, available: &[Tag], loading: bool, failed: bool) -> Option<&'static str> {
        if !self.filtered_tags(available).is_empty() || self.show_create_option() {
            return None;
        }
        Some(if loading {
            "Loading tags..."
        } else if failed {
            "Unable to load tags"
        } else {
            "No tags found."
        })
    }

    pub fn focus_input(&mut self) {
        self.focus = Some(SelectorFocus::Input);
        self.dropdown_visible = true;
    }

    fn focus_options(&mut self) {
        self.focus = Some(SelectorFocus::Options);
        self.option_index = 0;
        self.dropdown_visible = true;
    }

    /// Focus left the control entirely.
    pub fn blur(&mut self) {
        self.focus = None;
        self.dropdown_visible = false;
        self.search.clear();
        self.active_index = None;
        self.option_index = 0;
    }

    /// Commit `tag` into the selection and return to a clean, open input.
    pub fn select(&mut self, tag: Tag) {
        self.selection.insert(tag);
        self.search.clear();
        self.active_index = None;
        self.option_index = 0;
        self.focus_input();
    }

    /// Remove a tag by id, keeping the chip cursor on a valid index.
    pub fn remove_tag(&mut self, id: &TagId) {
        let Some(removed) = self.selection.remove(id) else {
            return;
        };

        self.active_index = match self.active_index {
            Some(active) if removed < active => Some(active - 1),
            Some(active) if removed == active => active.checked_sub(1),
            other => other,
        }
        .filter(|&index| index < self.selection.len());
    }

    /// Keyboard removal: the cursor moves to the following chip, else the
    /// preceding one, else nowhere.
    fn remove_by_index(&mut self, index: usize) {
        let tags = self.selection.tags();
        let Some(tag) = tags.get(index) else {
            return;
        };
        let id = tag.id.clone();
        let next_id = tags
            .get(index + 1)
            .or_else(|| index.checked_sub(1).and_then(|prev| tags.get(prev)))
            .map(|tag| tag.id.clone());

        self.remove_tag(&id);
        self.active_index = next_id.and_then(|next| {
            self.selection
                .tags()
                .iter()
                .position(|tag| tag.id == next)
        });
    }

    /// Key handling while the text input has focus.
    pub fn handle_input_key(&mut self, code: KeyCode, available: &[Tag]) {
        match code {
            KeyCode::Left if self.search.is_empty() => {
                self.active_index = match self.active_index {
                    None => self.selection.len().checked_sub(1),
                    Some(active) => Some(active.saturating_sub(1)),
                };
            }
            KeyCode::Right if self.active_index.is_some() => {
                self.active_index = self
                    .active_index
                    .map(|active| active + 1)
                    .filter(|&next| next < self.selection.len());
            }
            KeyCode::Backspace | KeyCode::Enter if self.active_index.is_some() => {
                if let Some(active) = self.active_index {
                    self.remove_by_index(active);
                }
            }
            KeyCode::Enter => {
                if let Some(first) = self.filtered_tags(available).first() {
                    let tag = (*first).clone();
                    self.select(tag);
                }
            }
            KeyCode::Backspace if self.search.is_empty() => {
                if !self.selection.is_empty() {
                    self.remove_by_index(self.selection.len() - 1);
                }
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.active_index = None;
            }
            KeyCode::Char(c) => {
                self.active_index = None;
                self.search.push(c);
            }
            KeyCode::Down if !self.options(available).is_empty() => self.focus_options(),
            _ => {}
        }
    }

    /// Key handling while a dropdown option is highlighted.
    pub fn handle_options_key(&mut self, code: KeyCode, available: &[Tag]) {
        let count = self.options(available).len();
        if count == 0 {
            self.focus_input();
            return;
        }
        let current = self.option_index.min(count - 1);

        match code {
            KeyCode::Up if current > 0 => self.option_index = current - 1,
            KeyCode::Up | KeyCode::Esc => self.focus_input(),
            KeyCode::Down => {
                self.option_index = (current + 1).min(count - 1);
            }
            KeyCode::Enter => match self.options(available).get(current).copied() {
                Some(SelectorOption::Tag(tag)) => self.select(tag.clone()),
                Some(SelectorOption::Create) => self.open_create_dialog(),
                None => {}
            },
            KeyCode::Char(_) | KeyCode::Backspace => {
                self.focus_input();
                self.handle_input_key(code, available);
            }
            _ => {}
        }
    }

    /// Accept the "Add …" option: open the dialog prefilled with the search.
    pub fn open_create_dialog(&mut self) {
        if !self.show_create_option() || self.creating {
            return;
        }
        self.dialog = Some(CreateTagDialog::new(self.trimmed_search()));
        self.focus = Some(SelectorFocus::Dialog);
        self.dropdown_visible = false;
        self.active_index = None;
    }

    /// Key handling inside the create dialog. Returns a request when the
    /// user confirms a valid draft.
    pub fn handle_dialog_key(&mut self, code: KeyCode) -> Option<CreateTagRequest> {
        match code {
            KeyCode::Enter => return self.confirm_create(),
            KeyCode::Esc => self.cancel_create(),
            _ if self.creating => {}
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.toggle_field();
                }
            }
            KeyCode::Char(c) => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.field_mut().push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.field_mut().pop();
                }
            }
            _ => {}
        }
        None
    }

    /// Validate the draft and mark creation in flight. Blank names and
    /// repeated confirms while a request is pending yield nothing.
    pub fn confirm_create(&mut self) -> Option<CreateTagRequest> {
        if self.creating {
            return None;
        }
        let dialog = self.dialog.as_mut()?;
        let name = dialog.name.trim();
        if name.is_empty() {
            return None;
        }

        let request = CreateTagRequest {
            name: name.to_string(),
            color: Some(dialog.preview_color()),
        };
        dialog.error = None;
        self.creating = true;
        Some(request)
    }

    /// Close the dialog. Ignored while a request is in flight.
    pub fn cancel_create(&mut self) {
        if self.creating {
            return;
        }
        self.dialog = None;
        self.focus_input();
    }

    pub fn create_succeeded(&mut self, tag: Tag) {
        self.creating = false;
        self.dialog = None;
        self.selection.insert(tag);
        self.search.clear();
        self.active_index = None;
        self.focus = Some(SelectorFocus::Input);
        self.dropdown_visible = false;
    }

    /// Keep the draft and search text so the user can retry.
    pub fn create_failed(&mut self, message: String) {
        self.creating = false;
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.error = Some(message);
        }
    }
}

/// Split `label` around the first case-insensitive occurrence of the trimmed
/// search text.
pub fn highlight_label<'a>(label: &'a str, search: &str) -> Option<(&'a str, &'a str, &'a str)> {
    let needle: Vec<char> = search.trim().chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    label.char_indices().find_map(|(start, _)| {
        let end = start + match_len(&label[start..], &needle)?;
        Some((&label[..start], &label[start..end], &label[end..]))
    })
}

/// Byte length of the prefix of `haystack` whose lowercase form equals
/// `needle`.
fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in haystack.char_indices() {
        for lower in ch.to_lowercase() {
            if matched == needle.len() {
                break;
            }
            if needle[matched] != lower {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<Tag> {
        vec![
            Tag::new("a", "Alpha"),
            Tag::new("b", "Beta"),
            Tag::new("c", "Gamma"),
        ]
    }

    fn selector_with(selected: &[&str]) -> TagSelector {
        let mut selector = TagSelector::new(true);
        for tag in tags().into_iter().filter(|t| selected.contains(&t.id.as_str())) {
            selector.select(tag);
        }
        selector
    }

    fn type_text(selector: &mut TagSelector, text: &str, available: &[Tag]) {
        for c in text.chars() {
            selector.handle_input_key(KeyCode::Char(c), available);
        }
    }

    fn selected_ids(selector: &TagSelector) -> Vec<&str> {
        selector
            .selection()
            .tags()
            .iter()
            .map(|tag| tag.id.as_str())
            .collect()
    }

    #[test]
    fn search_filters_by_case_insensitive_substring() {
        let available = vec![Tag::new("a", "Alpha"), Tag::new("b", "Beta")];
        let mut selector = TagSelector::new(false);
        type_text(&mut selector, "al", &available);

        assert_eq!(selector.filtered_tags(&available), vec![&Tag::new("a", "Alpha")]);
    }

    #[test]
    fn filtered_tags_exclude_selected() {
        let available = tags();
        let selector = selector_with(&["b"]);

        let ids: Vec<&str> = selector
            .filtered_tags(&available)
            .iter()
            .map(|tag| tag.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn selecting_twice_keeps_ids_unique() {
        let mut selector = TagSelector::new(false);
        selector.select(Tag::new("a", "Alpha"));
        selector.select(Tag::new("a", "Alpha (renamed)"));

        assert_eq!(selector.selection().tags(), &[Tag::new("a", "Alpha")]);
    }

    #[test]
    fn enter_selects_first_filtered_and_reopens_input() {
        let available = tags();
        let mut selector = TagSelector::new(false);
        selector.focus_input();
        type_text(&mut selector, "a", &available);

        selector.handle_input_key(KeyCode::Enter, &available);

        assert_eq!(selected_ids(&selector), vec!["a"]);
        assert_eq!(selector.search(), "");
        assert!(selector.is_dropdown_visible());
        assert_eq!(selector.focus(), Some(SelectorFocus::Input));
    }

    #[test]
    fn arrow_left_walks_chips_from_the_end() {
        let available = tags();
        let mut selector = selector_with(&["a", "b", "c"]);

        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(2));
        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(1));
        selector.handle_input_key(KeyCode::Left, &available);
        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(0));
    }

    #[test]
    fn arrow_left_ignored_while_searching() {
        let available = tags();
        let mut selector = selector_with(&["a"]);
        type_text(&mut selector, "g", &available);

        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), None);
    }

    #[test]
    fn arrow_right_clears_past_last_chip() {
        let available = tags();
        let mut selector = selector_with(&["a", "b"]);
        selector.handle_input_key(KeyCode::Left, &available);
        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(0));

        selector.handle_input_key(KeyCode::Right, &available);
        assert_eq!(selector.active_index(), Some(1));
        selector.handle_input_key(KeyCode::Right, &available);
        assert_eq!(selector.active_index(), None);
    }

    #[test]
    fn removing_active_chip_moves_cursor_to_following_chip() {
        let available = tags();
        let mut selector = selector_with(&["a", "b", "c"]);
        selector.handle_input_key(KeyCode::Left, &available);
        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(1));

        selector.handle_input_key(KeyCode::Backspace, &available);
        assert_eq!(selected_ids(&selector), vec!["a", "c"]);
        assert_eq!(selector.active_index(), Some(1));

        selector.handle_input_key(KeyCode::Enter, &available);
        assert_eq!(selected_ids(&selector), vec!["a"]);
        assert_eq!(selector.active_index(), Some(0));

        selector.handle_input_key(KeyCode::Backspace, &available);
        assert!(selector.selection().is_empty());
        assert_eq!(selector.active_index(), None);
    }

    #[test]
    fn backspace_on_empty_search_removes_last_chip() {
        let available = tags();
        let mut selector = selector_with(&["a", "b"]);

        selector.handle_input_key(KeyCode::Backspace, &available);
        assert_eq!(selected_ids(&selector), vec!["a"]);
        assert_eq!(selector.active_index(), Some(0));
    }

    #[test]
    fn backspace_while_searching_edits_text() {
        let available = tags();
        let mut selector = selector_with(&["a"]);
        type_text(&mut selector, "be", &available);

        selector.handle_input_key(KeyCode::Backspace, &available);
        assert_eq!(selector.search(), "b");
        assert_eq!(selected_ids(&selector), vec!["a"]);
    }

    #[test]
    fn typing_clears_chip_cursor() {
        let available = tags();
        let mut selector = selector_with(&["a"]);
        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(0));

        selector.handle_input_key(KeyCode::Char('g'), &available);
        assert_eq!(selector.active_index(), None);
        assert_eq!(selector.search(), "g");
    }

    #[test]
    fn removal_before_cursor_shifts_it_left() {
        let available = tags();
        let mut selector = selector_with(&["a", "b", "c"]);
        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(2));

        selector.remove_tag(&TagId::from("a"));
        assert_eq!(selector.active_index(), Some(1));
        assert_eq!(selected_ids(&selector), vec!["b", "c"]);
    }

    #[test]
    fn removing_cursor_chip_by_id_keeps_index_valid() {
        let available = tags();
        let mut selector = selector_with(&["a", "b"]);
        selector.handle_input_key(KeyCode::Left, &available);
        selector.handle_input_key(KeyCode::Left, &available);
        assert_eq!(selector.active_index(), Some(0));

        selector.remove_tag(&TagId::from("a"));
        assert_eq!(selector.active_index(), None);
    }

    #[test]
    fn active_index_always_valid_after_mixed_operations() {
        let available = tags();
        let mut selector = TagSelector::new(false);
        let keys = [
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Left,
            KeyCode::Enter,
            KeyCode::Left,
            KeyCode::Left,
            KeyCode::Backspace,
            KeyCode::Enter,
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Backspace,
            KeyCode::Backspace,
        ];
        for key in keys {
            selector.handle_input_key(key, &available);
            if let Some(active) = selector.active_index() {
                assert!(active < selector.selection().len());
            }
            let mut ids = selector.selection().ids();
            ids.dedup();
            assert_eq!(ids.len(), selector.selection().len());
        }
    }

    #[test]
    fn create_option_requires_callback_and_text() {
        let available = tags();
        let mut without_create = TagSelector::new(false);
        type_text(&mut without_create, "new", &available);
        assert!(!without_create.show_create_option());

        let mut with_create = TagSelector::new(true);
        assert!(!with_create.show_create_option());
        type_text(&mut with_create, "   ", &available);
        assert!(!with_create.show_create_option());
        type_text(&mut with_create, "new", &available);
        assert!(with_create.show_create_option());
        assert_eq!(with_create.options(&available), vec![SelectorOption::Create]);
    }

    #[test]
    fn visible_rows_are_bounded() {
        let many: Vec<Tag> = (0..8).map(|i| Tag::new(format!("t{i}"), format!("Tag {i}"))).collect();
        let selector = TagSelector::new(false);
        assert_eq!(selector.visible_rows(&many), 5);
        assert_eq!(selector.visible_rows(&[]), 1);
        assert_eq!(selector.visible_rows(&many[..2]), 2);
    }

    #[test]
    fn empty_message_reflects_load_state() {
        let selector = TagSelector::new(false);
        assert_eq!(selector.empty_message(&[], true, false), Some("Loading tags..."));
        assert_eq!(selector.empty_message(&[], false, true), Some("Unable to load tags"));
        assert_eq!(selector.empty_message(&[], false, false), Some("No tags found."));
        assert_eq!(selector.empty_message(&tags(), false, false), None);
    }

    #[test]
    fn blur_resets_transient_state() {
        let available = tags();
        let mut selector = selector_with(&["a"]);
        selector.focus_input();
        type_text(&mut selector, "be", &available);

        selector.blur();
        assert!(!selector.is_dropdown_visible());
        assert_eq!(selector.search(), "");
        assert_eq!(selector.active_index(), None);
        assert_eq!(selected_ids(&selector), vec!["a"]);
    }

    #[test]
    fn moving_into_options_keeps_dropdown_open() {
        let available = tags();
        let mut selector = TagSelector::new(false);
        selector.focus_input();

        selector.handle_input_key(KeyCode::Down, &available);
        assert_eq!(selector.focus(), Some(SelectorFocus::Options));
        assert!(selector.is_dropdown_visible());

        selector.handle_options_key(KeyCode::Down, &available);
        assert_eq!(selector.highlighted_option(&available), Some(1));
        selector.handle_options_key(KeyCode::Enter, &available);

        assert_eq!(selected_ids(&selector), vec!["b"]);
        assert_eq!(selector.focus(), Some(SelectorFocus::Input));
        assert!(selector.is_dropdown_visible());
    }

    #[test]
    fn up_from_first_option_returns_to_input() {
        let available = tags();
        let mut selector = TagSelector::new(false);
        selector.focus_input();
        selector.handle_input_key(KeyCode::Down, &available);

        selector.handle_options_key(KeyCode::Up, &available);
        assert_eq!(selector.focus(), Some(SelectorFocus::Input));
        assert!(selector.is_dropdown_visible());
    }

    #[test]
    fn create_flow_selects_returned_tag() {
        let available = tags();
        let mut selector = TagSelector::new(true);
        selector.focus_input();
        type_text(&mut selector, "  Deep work ", &available);

        selector.open_create_dialog();
        let dialog = selector.dialog().expect("dialog should open");
        assert_eq!(dialog.name, "Deep work");
        assert_eq!(dialog.color, DEFAULT_TAG_COLOR);

        selector.handle_dialog_key(KeyCode::Tab);
        for _ in 0..7 {
            selector.handle_dialog_key(KeyCode::Backspace);
        }
        type_text_dialog(&mut selector, "not-a-color");

        let request = selector.handle_dialog_key(KeyCode::Enter).expect("request");
        assert_eq!(request.name, "Deep work");
        assert_eq!(request.color.as_deref(), Some(DEFAULT_TAG_COLOR));
        assert!(selector.is_creating());
        assert!(selector.handle_dialog_key(KeyCode::Enter).is_none());

        selector.create_succeeded(Tag::new("new", "Deep work"));
        assert_eq!(selected_ids(&selector), vec!["new"]);
        assert!(selector.dialog().is_none());
        assert_eq!(selector.search(), "");
        assert!(!selector.is_creating());
    }

    fn type_text_dialog(selector: &mut TagSelector, text: &str) {
        for c in text.chars() {
            selector.handle_dialog_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn failed_create_preserves_search_and_selection() {
        let available = tags();
        let mut selector = selector_with(&["a"]);
        type_text(&mut selector, "ops", &available);
        selector.open_create_dialog();
        selector.confirm_create().expect("request");

        selector.handle_dialog_key(KeyCode::Esc);
        assert!(selector.dialog().is_some(), "cannot cancel while creating");

        selector.create_failed("Failed to create tag".to_string());
        assert_eq!(selector.search(), "ops");
        assert_eq!(selected_ids(&selector), vec!["a"]);
        assert_eq!(
            selector.dialog().and_then(|d| d.error.as_deref()),
            Some("Failed to create tag")
        );
        assert!(selector.confirm_create().is_some(), "retry is allowed");
    }

    #[test]
    fn blank_dialog_name_sends_nothing() {
        let available = tags();
        let mut selector = TagSelector::new(true);
        type_text(&mut selector, "x", &available);
        selector.open_create_dialog();
        selector.handle_dialog_key(KeyCode::Backspace);
        type_text_dialog(&mut selector, "   ");

        assert!(selector.confirm_create().is_none());
        assert!(!selector.is_creating());
    }

    #[test]
    fn highlight_splits_first_match_only() {
        assert_eq!(
            highlight_label("Banana", "an"),
            Some(("B", "an", "ana"))
        );
        assert_eq!(highlight_label("Alpha", " AL "), Some(("", "Al", "pha")));
        assert_eq!(highlight_label("Beta", "x"), None);
        assert_eq!(highlight_label("Beta", ""), None);
    }

    #[test]
    fn highlight_handles_multibyte_labels() {
        assert_eq!(highlight_label("Café Öl", "öl"), Some(("Café ", "Öl", "")));
    }
}
