use crate::options::CompileOptions;

/// Output buffer shared by the CSS and HTML writers
pub(crate) struct Context<'a> {
    pub options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    /// Newline in pretty mode, nothing otherwise
    pub fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    pub fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}
