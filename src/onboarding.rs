use std::str::FromStr;

/// Platforms reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingSystem {
    MacOs,
    Windows,
    Linux,
    Browser,
    Unknown,
}

impl FromStr for OperatingSystem {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "macOS" => OperatingSystem::MacOs,
            "windows" => OperatingSystem::Windows,
            "linux" => OperatingSystem::Linux,
            "browser" => OperatingSystem::Browser,
            _ => OperatingSystem::Unknown,
        })
    }
}

impl OperatingSystem {
    /// The intro video only plays on macOS and Windows.
    pub fn shows_intro(&self) -> bool {
        matches!(self, OperatingSystem::MacOs | OperatingSystem::Windows)
    }
}

/// Library state the onboarding screen depends on.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    pub loading: bool,
    pub library_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingView {
    /// Libraries are still loading; render nothing
    Blank,
    /// A library exists already; replace the route
    Redirect(String),
    Onboarding { show_intro: bool },
}

/// Decide what the onboarding screen shows.
pub fn onboarding_view(os: OperatingSystem, libraries: &LibraryState) -> OnboardingView {
    if libraries.loading {
        return OnboardingView::Blank;
    }

    match &libraries.library_id {
        Some(id) => OnboardingView::Redirect(format!("/{id}")),
        None => OnboardingView::Onboarding {
            show_intro: os.shows_intro(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_only_on_desktop_platforms() {
        let fresh = LibraryState::default();

        for (os, expected) in [("macOS", true), ("windows", true), ("linux", false), ("browser", false), ("plan9", false)] {
            let os: OperatingSystem = os.parse().unwrap();
            assert_eq!(
                onboarding_view(os, &fresh),
                OnboardingView::Onboarding { show_intro: expected }
            );
        }
    }

    #[test]
    fn test_existing_library_redirects() {
        let state = LibraryState {
            loading: false,
            library_id: Some("8c1f2d4e".into()),
        };
        assert_eq!(
            onboarding_view(OperatingSystem::MacOs, &state),
            OnboardingView::Redirect("/8c1f2d4e".into())
        );
    }

    #[test]
    fn test_loading_renders_nothing() {
        let state = LibraryState {
            loading: true,
            library_id: Some("8c1f2d4e".into()),
        };
        assert_eq!(onboarding_view(OperatingSystem::Linux, &state), OnboardingView::Blank);
    }
}
