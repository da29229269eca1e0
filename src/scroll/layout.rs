use std::collections::HashMap;

/// Vertical placement of a page section in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f32,
    pub height: f32,
}

impl SectionRect {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Geometry of the page the scroll triggers observe.
/// Replaced wholesale on every layout change.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub viewport_width: f32,
    pub viewport_height: f32,
    sections: HashMap<String, SectionRect>,
}

impl PageLayout {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            sections: HashMap::new(),
        }
    }

    /// Sections placed one after another from the top of the document
    pub fn stacked<'a>(
        viewport_width: f32,
        viewport_height: f32,
        sections: impl IntoIterator<Item = (&'a str, f32)>,
    ) -> Self {
        let mut layout = Self::new(viewport_width, viewport_height);
        let mut top = 0.0;
        for (selector, height) in sections {
            layout.sections.insert(selector.to_string(), SectionRect::new(top, height));
            top += height;
        }
        layout
    }

    pub fn with_section(mut self, selector: impl Into<String>, rect: SectionRect) -> Self {
        self.sections.insert(selector.into(), rect);
        self
    }

    pub fn section(&self, selector: &str) -> Option<&SectionRect> {
        self.sections.get(selector)
    }

    pub fn remove_section(&mut self, selector: &str) -> Option<SectionRect> {
        self.sections.remove(selector)
    }

    /// Total document height
    pub fn document_height(&self) -> f32 {
        self.sections
            .values()
            .map(SectionRect::bottom)
            .fold(self.viewport_height, f32::max)
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Same sections, new viewport size
    pub fn resized(&self, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            sections: self.sections.clone(),
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
