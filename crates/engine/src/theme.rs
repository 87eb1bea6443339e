use bookconnect_core::Theme;

/// Night only when both the preference and the system ask for it.
pub fn resolve_theme(preference: Theme, system_prefers_dark: bool) -> Theme {
    if preference == Theme::Night && system_prefers_dark {
        Theme::Night
    } else {
        Theme::Day
    }
}
