use xdotool_integration::Xdotool;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) xdotool: Xdotool,
}
