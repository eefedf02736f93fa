use ticker::{Timer, TimerDraft, TimerId, TimerPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Form,
}

/// One line of editable text for the form fields.
///
/// `cursor` is a byte offset into `value` and always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl From<&str> for TextInput {
    /// Prefilled input with the cursor at the end.
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the char before the cursor, if any.
    pub fn backspace(&mut self) {
        if let Some((start, _)) = self.char_before_cursor() {
            self.value.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((start, _)) = self.char_before_cursor() {
            self.cursor = start;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// (before, after) the cursor, for drawing the caret between them.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }

    fn char_before_cursor(&self) -> Option<(usize, char)> {
        self.value[..self.cursor].char_indices().next_back()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Project,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Project,
            FormField::Project => FormField::Title,
        }
    }
}

/// The create/edit form. `editing` holds the id of the timer being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerForm {
    pub editing: Option<TimerId>,
    pub title: TextInput,
    pub project: TextInput,
    pub focused: FormField,
}

impl TimerForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: TextInput::default(),
            project: TextInput::default(),
            focused: FormField::Title,
        }
    }

    pub fn edit(timer: &Timer) -> Self {
        Self {
            editing: Some(timer.id.clone()),
            title: TextInput::from(timer.title.as_str()),
            project: TextInput::from(timer.project.as_str()),
            focused: FormField::Title,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update"
        } else {
            "Create"
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused {
            FormField::Title => &mut self.title,
            FormField::Project => &mut self.project,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn into_submission(self) -> FormSubmission {
        match self.editing {
            Some(id) => FormSubmission::Update(TimerPatch::new(
                id,
                self.title.value,
                self.project.value,
            )),
            None => FormSubmission::Create(TimerDraft::new(self.title.value, self.project.value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Create(TimerDraft),
    Update(TimerPatch),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_edits_multibyte_text() {
        let mut input = TextInput::from("på");
        input.backspace();
        assert_eq!(input.value, "p");

        input.insert('å');
        input.move_left();
        input.insert('x');
        assert_eq!(input.value, "pxå");
        assert_eq!(input.split_at_cursor(), ("px", "å"));

        input.end();
        input.move_right();
        assert_eq!(input.cursor, input.value.len());
    }

    #[test]
    fn text_input_is_inert_at_the_edges() {
        let mut input = TextInput::from("é");
        input.home();
        input.backspace();
        input.move_left();
        assert_eq!((input.value.as_str(), input.cursor), ("é", 0));

        input.move_right();
        assert_eq!(input.cursor, 'é'.len_utf8());
    }

    #[test]
    fn edit_form_prefills_and_submits_an_update() {
        let timer = Timer::new(TimerId::from("t"), "Read", "Books");
        let mut form = TimerForm::edit(&timer);
        assert_eq!(form.submit_label(), "Update");

        form.focus_next();
        form.focused_input().insert('!');

        assert_eq!(
            form.into_submission(),
            FormSubmission::Update(TimerPatch::new(TimerId::from("t"), "Read", "Books!"))
        );
    }

    #[test]
    fn create_form_submits_a_draft() {
        let mut form = TimerForm::create();
        assert_eq!(form.submit_label(), "Create");
        form.focused_input().insert('A');

        assert_eq!(
            form.into_submission(),
            FormSubmission::Create(TimerDraft::new("A", ""))
        );
    }
}
