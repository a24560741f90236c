use super::super::*;

pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::ShowHelp => app.show_help(),
        Action::SelectMode => app.open_mode_select(),
        Action::ThemeDark => app.switch_theme_and_save("dark"),
        Action::ThemeLight => app.switch_theme_and_save("light"),
        Action::ThemeContrast => app.switch_theme_and_save("high_contrast"),
        _ => unreachable!("non-dialog action: {:?}", action),
    }
}
