//! Firehose value model and XML rendering.
//!
//! Every report element is an immutable, structurally comparable value
//! that knows how to render itself. Composite elements assemble their
//! children in fixed schema order through [`join`], which drops empty
//! fragments so that absent subtrees vanish from the output.
//!
//! Absence is explicit: optional parts are `Option`s (a location's span,
//! a state's notes, an issue's trace) and text fields treat the empty
//! string as "no information".

/// Rendering capability shared by every report element.
pub trait Render {
    /// Produce the XML fragment for this element, or `""` when the
    /// element carries no information.
    fn render(&self) -> String;
}

/// Join non-empty fragments with `sep`. No leading or trailing separator.
pub fn join(fragments: &[String], sep: &str) -> String {
    fragments
        .iter()
        .filter(|f| !f.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(sep)
}

fn join_lines(fragments: &[String]) -> String {
    join(fragments, "\n")
}

/// Escape `& < > " '` for use in attribute values and text content.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// A column/line pair. Zero-based columns and lines are legal values;
/// absence is expressed by the owner holding no span at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub column: u32,
    pub line: u32,
}

impl Point {
    pub fn new(column: u32, line: u32) -> Self {
        Point { column, line }
    }
}

impl Render for Point {
    fn render(&self) -> String {
        format!("<point column=\"{}\" line=\"{}\"/>", self.column, self.line)
    }
}

/// A start/end point pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

impl Range {
    pub fn new(start: Point, end: Point) -> Self {
        Range { start, end }
    }
}

impl Render for Range {
    fn render(&self) -> String {
        join_lines(&[
            "<range>".to_string(),
            self.start.render(),
            self.end.render(),
            "</range>".to_string(),
        ])
    }
}

/// Exactly one of a range or a single point, per construction path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    Range(Range),
    Point(Point),
}

impl Render for Span {
    fn render(&self) -> String {
        match self {
            Span::Range(r) => r.render(),
            Span::Point(p) => p.render(),
        }
    }
}

/// Source file reference. An empty path means "no file information".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct File {
    path: String,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        File { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_absent(&self) -> bool {
        self.path.is_empty()
    }
}

impl Render for File {
    fn render(&self) -> String {
        if self.is_absent() {
            String::new()
        } else {
            format!("<file given-path=\"{}\"/>", escape_xml(&self.path))
        }
    }
}

/// Function reference. An empty name means "no function information".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Function {
    name: String,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Function { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_absent(&self) -> bool {
        self.name.is_empty()
    }
}

impl Render for Function {
    fn render(&self) -> String {
        if self.is_absent() {
            String::new()
        } else {
            format!("<function name=\"{}\"/>", escape_xml(&self.name))
        }
    }
}

/// A source location: file, function, and optionally a range or point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub file: File,
    pub function: Function,
    pub span: Option<Span>,
}

impl Location {
    /// Location without range/point information.
    pub fn new(file: File, function: Function) -> Self {
        Location {
            file,
            function,
            span: None,
        }
    }

    pub fn with_range(file: File, function: Function, range: Range) -> Self {
        Location {
            file,
            function,
            span: Some(Span::Range(range)),
        }
    }

    pub fn with_point(file: File, function: Function, point: Point) -> Self {
        Location {
            file,
            function,
            span: Some(Span::Point(point)),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.file.is_absent() && self.function.is_absent() && self.span.is_none()
    }
}

impl Render for Location {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        join_lines(&[
            "<location>".to_string(),
            self.file.render(),
            self.function.render(),
            self.span.as_ref().map(Render::render).unwrap_or_default(),
            "</location>".to_string(),
        ])
    }
}

/// Free-text message body. Empty text means "no message".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Message(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_empty()
    }
}

impl Render for Message {
    fn render(&self) -> String {
        if self.is_absent() {
            String::new()
        } else {
            format!("<message>{}</message>", escape_xml(&self.0))
        }
    }
}

/// Free-text annotation attached to a trace state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notes(String);

impl Notes {
    pub fn new(text: impl Into<String>) -> Self {
        Notes(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_empty()
    }
}

impl Render for Notes {
    fn render(&self) -> String {
        if self.is_absent() {
            String::new()
        } else {
            format!("<notes>{}</notes>", escape_xml(&self.0))
        }
    }
}

/// One step of an execution trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    pub location: Location,
    pub notes: Option<Notes>,
}

impl State {
    pub fn new(location: Location) -> Self {
        State {
            location,
            notes: None,
        }
    }

    pub fn with_notes(location: Location, notes: Notes) -> Self {
        State {
            location,
            notes: Some(notes),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.location.is_absent() && self.notes.is_none()
    }
}

impl Render for State {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        join_lines(&[
            "<state>".to_string(),
            self.location.render(),
            self.notes.as_ref().map(Render::render).unwrap_or_default(),
            "</state>".to_string(),
        ])
    }
}

/// Ordered sequence of trace states. An empty sequence still renders its
/// tag pair; the canonical absent trace (one absent state) renders to "".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    pub states: Vec<State>,
}

impl Trace {
    pub fn new(states: Vec<State>) -> Self {
        Trace { states }
    }

    /// The canonical "no trace information" value.
    pub fn absent() -> Self {
        Trace {
            states: vec![State::default()],
        }
    }

    pub fn is_absent(&self) -> bool {
        *self == Self::absent()
    }
}

impl Render for Trace {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        let mut parts = Vec::with_capacity(self.states.len() + 2);
        parts.push("<trace>".to_string());
        for state in &self.states {
            parts.push(state.render());
        }
        parts.push("</trace>".to_string());
        join_lines(&parts)
    }
}

/// A confirmed defect finding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Issue {
    pub message: Message,
    pub location: Location,
    pub trace: Option<Trace>,
}

impl Issue {
    pub fn new(message: Message, location: Location) -> Self {
        Issue {
            message,
            location,
            trace: None,
        }
    }

    pub fn with_trace(message: Message, location: Location, trace: Trace) -> Self {
        Issue {
            message,
            location,
            trace: Some(trace),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.message.is_absent() && self.location.is_absent() && self.trace.is_none()
    }
}

impl Render for Issue {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        join_lines(&[
            "<issue>".to_string(),
            self.message.render(),
            self.location.render(),
            self.trace.as_ref().map(Render::render).unwrap_or_default(),
            "</issue>".to_string(),
        ])
    }
}

/// A tool-level failure, e.g. an unresolved external symbol. The
/// `failure-id` attribute is always rendered, even when empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Failure {
    pub id: String,
    pub message: Message,
    pub location: Location,
}

impl Failure {
    pub fn new(id: impl Into<String>, message: Message) -> Self {
        Failure {
            id: id.into(),
            message,
            location: Location::default(),
        }
    }

    pub fn with_location(id: impl Into<String>, message: Message, location: Location) -> Self {
        Failure {
            id: id.into(),
            message,
            location,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.id.is_empty() && self.message.is_absent() && self.location.is_absent()
    }
}

impl Render for Failure {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        join_lines(&[
            format!("<failure failure-id=\"{}\">", escape_xml(&self.id)),
            self.location.render(),
            self.message.render(),
            "</failure>".to_string(),
        ])
    }
}

/// An informational notice. Carries a category id but no location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Info {
    pub id: String,
    pub message: Message,
}

impl Info {
    pub fn new(id: impl Into<String>, message: Message) -> Self {
        Info {
            id: id.into(),
            message,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.id.is_empty() && self.message.is_absent()
    }
}

impl Render for Info {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        join_lines(&[
            format!("<info failure-id=\"{}\">", escape_xml(&self.id)),
            self.message.render(),
            "</info>".to_string(),
        ])
    }
}

/// The closed set of elements that may appear under `<results>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Issue(Issue),
    Failure(Failure),
    Info(Info),
}

impl Render for Element {
    fn render(&self) -> String {
        match self {
            Element::Issue(i) => i.render(),
            Element::Failure(f) => f.render(),
            Element::Info(i) => i.render(),
        }
    }
}

/// Ordered list of issues under the document root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Results {
    pub issues: Vec<Issue>,
}

impl Results {
    pub fn new(issues: Vec<Issue>) -> Self {
        Results { issues }
    }

    pub fn absent() -> Self {
        Results {
            issues: vec![Issue::default()],
        }
    }

    pub fn is_absent(&self) -> bool {
        *self == Self::absent()
    }
}

impl Render for Results {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        let mut parts = Vec::with_capacity(self.issues.len() + 2);
        parts.push("<results>".to_string());
        for issue in &self.issues {
            parts.push(issue.render());
        }
        parts.push("</results>".to_string());
        join_lines(&parts)
    }
}

/// Identifies the tool that produced the report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generator {
    pub name: String,
    pub version: String,
}

impl Generator {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Generator {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.name.is_empty() && self.version.is_empty()
    }
}

impl Render for Generator {
    fn render(&self) -> String {
        if self.is_absent() {
            String::new()
        } else {
            format!(
                "<generator name=\"{}\" version=\"{}\"/>",
                escape_xml(&self.name),
                escape_xml(&self.version)
            )
        }
    }
}

/// Report metadata block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub generator: Generator,
}

impl Metadata {
    pub fn new(generator: Generator) -> Self {
        Metadata { generator }
    }

    pub fn is_absent(&self) -> bool {
        self.generator.is_absent()
    }
}

impl Render for Metadata {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        join_lines(&[
            "<metadata>".to_string(),
            self.generator.render(),
            "</metadata>".to_string(),
        ])
    }
}

/// The document root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub metadata: Metadata,
    pub results: Results,
}

impl Analysis {
    pub fn new(metadata: Metadata, results: Results) -> Self {
        Analysis { metadata, results }
    }

    pub fn is_absent(&self) -> bool {
        self.metadata.is_absent() && self.results.is_absent()
    }
}

impl Render for Analysis {
    fn render(&self) -> String {
        if self.is_absent() {
            return String::new();
        }
        join_lines(&[
            "<analysis>".to_string(),
            self.metadata.render(),
            self.results.render(),
            "</analysis>".to_string(),
        ])
    }
}
