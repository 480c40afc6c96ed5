/// Platform suffix precedence
///
/// A manifest key may carry a platform suffix before its extension
/// (`page.ios.tsx`). Each target platform accepts a fixed list of suffixes,
/// most specific first; anything else is skipped.
use serde::{Deserialize, Serialize};

/// Every suffix recognised as a platform marker
pub const VALID_PLATFORM_SUFFIXES: [&str; 4] = ["android", "ios", "native", "web"];

/// Target platform of a resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
    /// No platform context: every platform-suffixed file is skipped
    #[default]
    None,
}

impl Platform {
    /// Accepted suffixes, most specific first
    pub fn accepted_suffixes(self) -> &'static [&'static str] {
        match self {
            Platform::Ios => &["ios", "native"],
            Platform::Android => &["android", "native"],
            Platform::Web => &["web"],
            Platform::None => &[],
        }
    }

    /// Specificity slot of a file with the given suffix
    ///
    /// Un-suffixed files take slot 0; accepted suffixes rank above it with
    /// the exact platform highest. `None` means the file is skipped.
    ///
    /// ```
    /// use rhtmx_route_tree::Platform;
    ///
    /// assert_eq!(Platform::Ios.specificity(None), Some(0));
    /// assert_eq!(Platform::Ios.specificity(Some("ios")), Some(2));
    /// assert_eq!(Platform::Ios.specificity(Some("native")), Some(1));
    /// assert_eq!(Platform::Web.specificity(Some("native")), None);
    /// assert_eq!(Platform::None.specificity(Some("ios")), None);
    /// ```
    pub fn specificity(self, suffix: Option<&str>) -> Option<usize> {
        let Some(suffix) = suffix else {
            return Some(0);
        };
        let table = self.accepted_suffixes();
        table
            .iter()
            .position(|accepted| *accepted == suffix)
            .map(|position| table.len() - position)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Web => "web",
            Platform::None => "none",
        }
    }

    pub fn is_web(self) -> bool {
        self == Platform::Web
    }
}

/// Splits a recognised platform suffix off an extension-less file name
///
/// ```
/// use rhtmx_route_tree::tree::platform::split_platform_suffix;
///
/// assert_eq!(split_platform_suffix("page.ios"), ("page", Some("ios")));
/// assert_eq!(split_platform_suffix("page.module"), ("page.module", None));
/// assert_eq!(split_platform_suffix("page"), ("page", None));
/// ```
pub fn split_platform_suffix(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, suffix)) if VALID_PLATFORM_SUFFIXES.contains(&suffix) => (stem, Some(suffix)),
        _ => (name, None),
    }
}
