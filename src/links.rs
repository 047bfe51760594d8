#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Adding,
    Editing(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submit {
    Ignored,
    Added,
    DroppedDuplicate,
    Saved(usize),
}

/// Ordered list of purchase-link lines plus the editing cursor. The canonical
/// serialized form is the entries joined with `\n`, which is what the hidden
/// form field carries on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkList {
    entries: Vec<String>,
    mode: Mode,
}

impl LinkList {
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            entries,
            mode: Mode::Adding,
        }
    }

    pub fn serialize(&self) -> String {
        self.entries.join("\n")
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    /// Moves the cursor onto `index` and returns the entry text to load into
    /// the input. Out-of-range indices leave the state untouched.
    pub fn begin_edit(&mut self, index: usize) -> Option<&str> {
        if index >= self.entries.len() {
            return None;
        }
        self.mode = Mode::Editing(index);
        Some(&self.entries[index])
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Adding;
    }

    /// Removes the entry at `index`. The cursor keeps pointing at the same
    /// logical entry: deleting the edited entry drops back to `Adding`,
    /// deleting an earlier one shifts the cursor down by one.
    pub fn delete(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        match self.mode {
            Mode::Editing(edited) if edited == index => self.mode = Mode::Adding,
            Mode::Editing(edited) if edited > index => self.mode = Mode::Editing(edited - 1),
            _ => {}
        }
        true
    }

    /// Add/save path for the input's current value. Blank input is ignored.
    /// While editing, the cursor's entry is overwritten (no dedup check);
    /// while adding, an exact match against an existing entry is dropped.
    pub fn submit(&mut self, input: &str) -> Submit {
        let value = input.trim();
        if value.is_empty() {
            return Submit::Ignored;
        }
        match self.mode {
            Mode::Editing(index) => {
                self.entries[index] = value.to_string();
                self.mode = Mode::Adding;
                Submit::Saved(index)
            }
            Mode::Adding => {
                if self.entries.iter().any(|entry| entry == value) {
                    Submit::DroppedDuplicate
                } else {
                    self.entries.push(value.to_string());
                    Submit::Added
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_value_trimming_and_dropping_blanks() {
        let list = LinkList::parse("a\nb\nb\n\nc");
        assert_eq!(list.entries(), ["a", "b", "b", "c"]);
        assert_eq!(list.mode(), Mode::Adding);
        assert_eq!(list.serialize(), "a\nb\nb\nc");
    }

    #[test]
    fn parse_keeps_duplicates_and_handles_crlf() {
        let list = LinkList::parse("  a  \r\nb\r\n\r\na");
        assert_eq!(list.entries(), ["a", "b", "a"]);
    }

    #[test]
    fn adding_a_duplicate_is_dropped() {
        let mut list = LinkList::parse("a\nb\nb\nc");
        assert_eq!(list.submit("a"), Submit::DroppedDuplicate);
        assert_eq!(list.serialize(), "a\nb\nb\nc");
    }

    #[test]
    fn duplicate_check_is_exact_and_case_sensitive() {
        let mut list = LinkList::parse("a");
        assert_eq!(list.submit("A"), Submit::Added);
        assert_eq!(list.entries(), ["a", "A"]);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut list = LinkList::parse("a");
        assert_eq!(list.submit("   "), Submit::Ignored);
        assert_eq!(list.submit(""), Submit::Ignored);
        assert_eq!(list.entries(), ["a"]);
    }

    #[test]
    fn saving_overwrites_the_edited_entry() {
        let mut list = LinkList::parse("a\nb\nc");
        assert_eq!(list.begin_edit(1), Some("b"));
        assert_eq!(list.submit("B"), Submit::Saved(1));
        assert_eq!(list.entries(), ["a", "B", "c"]);
        assert_eq!(list.mode(), Mode::Adding);
    }

    #[test]
    fn saving_can_create_a_duplicate() {
        // Only the fresh-add path deduplicates.
        let mut list = LinkList::parse("a\nb");
        list.begin_edit(1);
        assert_eq!(list.submit("a"), Submit::Saved(1));
        assert_eq!(list.entries(), ["a", "a"]);
    }

    #[test]
    fn deleting_before_the_cursor_shifts_it_down() {
        let mut list = LinkList::parse("a\nb\nb\nc");
        list.begin_edit(2);
        assert!(list.delete(1));
        assert_eq!(list.mode(), Mode::Editing(1));
        assert_eq!(list.submit("B2"), Submit::Saved(1));
        assert_eq!(list.entries(), ["a", "B2", "c"]);
    }

    #[test]
    fn deleting_the_edited_entry_exits_edit_mode() {
        let mut list = LinkList::parse("a\nb");
        list.begin_edit(1);
        assert!(list.delete(1));
        assert_eq!(list.mode(), Mode::Adding);
        assert_eq!(list.entries(), ["a"]);
    }

    #[test]
    fn deleting_after_the_cursor_leaves_it_alone() {
        let mut list = LinkList::parse("a\nb\nc");
        list.begin_edit(0);
        assert!(list.delete(2));
        assert_eq!(list.mode(), Mode::Editing(0));
    }

    #[test]
    fn delete_out_of_range_is_a_noop() {
        let mut list = LinkList::parse("a");
        assert!(!list.delete(5));
        assert_eq!(list.entries(), ["a"]);
    }

    #[test]
    fn cancel_keeps_the_list_untouched() {
        let mut list = LinkList::parse("a\nb");
        list.begin_edit(0);
        list.cancel_edit();
        assert_eq!(list.mode(), Mode::Adding);
        assert_eq!(list.serialize(), "a\nb");
    }

    #[test]
    fn begin_edit_out_of_range_is_a_noop() {
        let mut list = LinkList::parse("a");
        assert_eq!(list.begin_edit(3), None);
        assert_eq!(list.mode(), Mode::Adding);
    }
}
