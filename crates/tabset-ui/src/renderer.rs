//! Layout calculation for the settings screen
//!
//! [`AppLayout`] divides the terminal into the tab strip, the page
//! content and the status bar. [`popup_area`] centers overlays such as
//! the key help.

use ratatui::prelude::*;

/// Main screen regions
///
/// ```text
/// +---------------------------------+
/// | Tab strip (1 line)              |
/// +---------------------------------+
/// |  Page content                   |
/// |  (inset by one cell)            |
/// +---------------------------------+
/// | Status bar (1 line)             |
/// +---------------------------------+
/// ```
///
/// # Example
///
/// ```
/// use tabset_ui::renderer::AppLayout;
/// use ratatui::prelude::Rect;
///
/// let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
///
/// assert_eq!(layout.tab_bar, Rect::new(0, 0, 80, 1));
/// assert_eq!(layout.content, Rect::new(0, 1, 80, 22));
/// assert_eq!(layout.page, Rect::new(1, 2, 78, 21));
/// assert_eq!(layout.status_bar, Rect::new(0, 23, 80, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    /// Tab strip (top)
    pub tab_bar: Rect,
    /// Everything between the tab strip and the status bar
    pub content: Rect,
    /// Content inset where the page's settings are drawn
    pub page: Rect,
    /// Status bar (bottom)
    pub status_bar: Rect,
}

impl AppLayout {
    /// Splits `area` into screen regions.
    ///
    /// Below three rows the tab strip and status bar are dropped in
    /// favour of content.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        if area.height < 3 {
            return AppLayout {
                tab_bar: Rect::default(),
                content: area,
                page: area,
                status_bar: Rect::default(),
            };
        }

        let tab_bar = Rect::new(area.x, area.y, area.width, 1);
        let status_bar = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let content = Rect::new(area.x, area.y + 1, area.width, area.height - 2);

        AppLayout {
            tab_bar,
            content,
            page: inset(content),
            status_bar,
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.content.width
    }

    /// Sum of all three rows of regions
    #[must_use]
    pub fn height(&self) -> u16 {
        self.tab_bar.height + self.content.height + self.status_bar.height
    }
}

/// One cell of padding left, right and top, when there is room for it
fn inset(area: Rect) -> Rect {
    if area.width < 3 || area.height < 2 {
        return area;
    }
    Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 1)
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`
///
/// Both dimensions are clamped to `area`.
///
/// ```
/// use tabset_ui::renderer::popup_area;
/// use ratatui::prelude::Rect;
///
/// let popup = popup_area(Rect::new(0, 0, 100, 30), 60, 10);
/// assert_eq!(popup, Rect::new(20, 10, 60, 10));
/// ```
#[must_use]
pub fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
