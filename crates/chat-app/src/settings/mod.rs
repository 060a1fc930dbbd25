mod state;

pub use state::{
    DEFAULT_BACKEND_URL, DEFAULT_HEADER, DEFAULT_TITLE, DEFAULT_WELCOME_MESSAGE, ENV_PREFIX,
    SETTINGS_DIRECTORY_NAME, SETTINGS_FILE_NAME, WidgetSettings,
};
