//! Linear guided-tour state machine

/// Substituted for `{name}` before the visitor has introduced themselves
pub const DEFAULT_VISITOR_NAME: &str = "friend";

/// Where the tour popover sits relative to its target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One step of the tour
#[derive(Debug, Clone, PartialEq)]
pub struct TourStep {
    /// Page the step belongs to. `None` shows on any page.
    pub path: Option<String>,
    /// Selector of the highlighted element
    pub target: Option<String>,
    pub placement: Placement,
    pub title: String,
    pub content: String,
    /// Step shows a text box whose value becomes the visitor name on advance
    pub asks_name: bool,
}

impl TourStep {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: None,
            target: None,
            placement: Placement::default(),
            title: title.into(),
            content: content.into(),
            asks_name: false,
        }
    }

    pub fn on_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn at(mut self, target: impl Into<String>, placement: Placement) -> Self {
        self.target = Some(target.into());
        self.placement = placement;
        self
    }

    pub fn asking_name(mut self) -> Self {
        self.asks_name = true;
        self
    }

    /// Whether this step belongs on the page at `path`.
    pub fn shows_on(&self, path: &str) -> bool {
        match &self.path {
            None => true,
            Some(p) => p.trim_start_matches('/') == path.trim_start_matches('/'),
        }
    }
}

/// Step contents with the visitor name filled in
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStep {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub content: String,
    pub placement: Placement,
    pub target: Option<String>,
    pub asks_name: bool,
}

impl RenderedStep {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPosition {
    NotStarted,
    At(usize),
    Finished,
}

/// Replace every `{name}` in `template`.
pub fn interpolate(template: &str, name: Option<&str>) -> String {
    template.replace("{name}", name.unwrap_or(DEFAULT_VISITOR_NAME))
}

#[derive(Debug, Clone)]
pub struct TourState {
    steps: Vec<TourStep>,
    position: TourPosition,
    name: Option<String>,
}

impl TourState {
    pub fn new(steps: Vec<TourStep>) -> Self {
        Self {
            steps,
            position: TourPosition::NotStarted,
            name: None,
        }
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    pub fn position(&self) -> TourPosition {
        self.position
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.position {
            TourPosition::At(i) => Some(i),
            _ => None,
        }
    }

    pub fn current_step(&self) -> Option<&TourStep> {
        self.current_index().and_then(|i| self.steps.get(i))
    }

    /// Jump to step `index`. Out of range finishes the tour.
    pub fn start_at(&mut self, index: usize) -> Option<usize> {
        self.position = if index < self.steps.len() {
            TourPosition::At(index)
        } else {
            TourPosition::Finished
        };
        self.current_index()
    }

    /// Advance one step. Returns the new index, or `None` once past the last step.
    pub fn next(&mut self) -> Option<usize> {
        match self.position {
            TourPosition::NotStarted => self.start_at(0),
            TourPosition::At(i) => self.start_at(i + 1),
            TourPosition::Finished => None,
        }
    }

    /// Go back one step, staying on the first.
    pub fn prev(&mut self) -> Option<usize> {
        if let TourPosition::At(i) = self.position {
            self.position = TourPosition::At(i.saturating_sub(1));
        }
        self.current_index()
    }

    pub fn end(&mut self) {
        self.position = TourPosition::Finished;
    }

    pub fn is_finished(&self) -> bool {
        self.position == TourPosition::Finished
    }

    /// Store the visitor name. Blank input clears it.
    pub fn set_name(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// First step at or after `from` that belongs on the page at `path`.
    pub fn first_step_on(&self, from: usize, path: &str) -> Option<usize> {
        (from..self.steps.len()).find(|&i| self.steps[i].shows_on(path))
    }

    pub fn render(&self, index: usize) -> Option<RenderedStep> {
        let step = self.steps.get(index)?;
        Some(RenderedStep {
            index,
            total: self.steps.len(),
            title: interpolate(&step.title, self.name()),
            content: interpolate(&step.content, self.name()),
            placement: step.placement,
            target: step.target.clone(),
            asks_name: step.asks_name,
        })
    }

    pub fn render_current(&self) -> Option<RenderedStep> {
        self.current_index().and_then(|i| self.render(i))
    }
}

/// The portal's built-in introduction tour
pub fn default_steps() -> Vec<TourStep> {
    vec![
        TourStep::new(
            "Welcome to the portal",
            "Before we start, what should we call you?",
        )
        .asking_name(),
        TourStep::new(
            "Nice to meet you, {name}",
            "This menu takes you to your projects, allocations and clusters.",
        )
        .at(".sidebar .nav", Placement::Right),
        TourStep::new(
            "Your profile",
            "Keep your contact details and public key up to date here, {name}.",
        )
        .at("#nav-profile", Placement::Bottom),
        TourStep::new(
            "That's it, {name}!",
            "You can replay this tour any time from the help menu.",
        ),
    ]
}
