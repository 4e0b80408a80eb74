/// Something the user types a message into.
pub trait TextSurface {
    /// Full current contents, lines joined with `\n`.
    fn text(&self) -> String;

    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRequest {
    Insert(char),
    Newline,
    DeletePrev,
    DeleteNext,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Multi-line editable text with a cursor. Cursor columns count chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }
}

impl From<&str> for TextArea {
    /// Cursor lands at the very end.
    fn from(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(String::from).collect();
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        Self { lines, row, col }
    }
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

impl TextArea {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `(row, column)` of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    /// Applies one edit. Returns whether the text or the cursor changed.
    pub fn handle(&mut self, req: EditRequest) -> bool {
        use EditRequest::*;

        let len = self.line_len(self.row);
        match req {
            Insert(c) => {
                let at = byte_index(&self.lines[self.row], self.col);
                self.lines[self.row].insert(at, c);
                self.col += 1;
            }
            Newline => {
                let at = byte_index(&self.lines[self.row], self.col);
                let rest = self.lines[self.row].split_off(at);
                self.lines.insert(self.row + 1, rest);
                self.row += 1;
                self.col = 0;
            }
            DeletePrev if self.col > 0 => {
                let at = byte_index(&self.lines[self.row], self.col - 1);
                self.lines[self.row].remove(at);
                self.col -= 1;
            }
            DeletePrev if self.row > 0 => {
                let line = self.lines.remove(self.row);
                self.row -= 1;
                self.col = self.line_len(self.row);
                self.lines[self.row].push_str(&line);
            }
            DeleteNext if self.col < len => {
                let at = byte_index(&self.lines[self.row], self.col);
                self.lines[self.row].remove(at);
            }
            DeleteNext if self.row + 1 < self.lines.len() => {
                let next = self.lines.remove(self.row + 1);
                self.lines[self.row].push_str(&next);
            }
            Left if self.col > 0 => self.col -= 1,
            Left if self.row > 0 => {
                self.row -= 1;
                self.col = self.line_len(self.row);
            }
            Right if self.col < len => self.col += 1,
            Right if self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.col = 0;
            }
            Up if self.row > 0 => {
                self.row -= 1;
                self.col = self.col.min(self.line_len(self.row));
            }
            Down if self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.col = self.col.min(self.line_len(self.row));
            }
            Home if self.col > 0 => self.col = 0,
            End if self.col < len => self.col = len,
            _ => return false,
        }
        true
    }
}

impl TextSurface for TextArea {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
