//! Banner carousel on top of the library page

use serde::Serialize;
use std::time::Duration;

/// How often the carousel moves on by itself
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Banner {
    pub id: u32,
    pub title: &'static str,
    pub image: &'static str,
    /// Fallback gradient shown when the image fails to load
    pub gradient: &'static str,
}

pub const DEFAULT_BANNERS: [Banner; 4] = [
    Banner {
        id: 1,
        title: "Saúde e Bem-estar",
        image: "/assets/health-library-hero.jpg",
        gradient: "from-emerald-500 to-teal-600",
    },
    Banner {
        id: 2,
        title: "Primeiros Socorros",
        image: "/assets/primeiros-socorros-cover.jpg",
        gradient: "from-red-500 to-rose-600",
    },
    Banner {
        id: 3,
        title: "Receitas Saudáveis",
        image: "/assets/receitas-saudaveis-cover.jpg",
        gradient: "from-orange-500 to-amber-600",
    },
    Banner {
        id: 4,
        title: "Colorir Animais",
        image: "/assets/colorir-animais-cover.jpg",
        gradient: "from-purple-500 to-violet-600",
    },
];

/// Looping carousel position
#[derive(Debug, Clone)]
pub struct BannerCarousel {
    banners: Vec<Banner>,
    active: usize,
}

impl Default for BannerCarousel {
    fn default() -> Self {
        Self::new(DEFAULT_BANNERS.to_vec())
    }
}

impl BannerCarousel {
    pub fn new(banners: Vec<Banner>) -> Self {
        Self { banners, active: 0 }
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Move to the next banner, wrapping to the first after the last
    pub fn advance(&mut self) -> usize {
        if !self.banners.is_empty() {
            self.active = (self.active + 1) % self.banners.len();
        }
        self.active
    }

    /// Jump to `index`; out-of-range indices are ignored
    pub fn scroll_to(&mut self, index: usize) -> bool {
        if index < self.banners.len() {
            self.active = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_loops() {
        let mut carousel = BannerCarousel::default();
        let visited: Vec<_> = (0..5).map(|_| carousel.advance()).collect();
        assert_eq!(visited, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_scroll_to_bounds() {
        let mut carousel = BannerCarousel::default();
        assert!(carousel.scroll_to(3));
        assert!(!carousel.scroll_to(4));
        assert_eq!(carousel.active(), 3);
    }

    #[test]
    fn test_empty_carousel_stays_put() {
        let mut carousel = BannerCarousel::new(Vec::new());
        assert_eq!(carousel.advance(), 0);
    }
}
