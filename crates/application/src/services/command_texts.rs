//! Fixed replies for `/start`, `/help` and `/menu`

use domain::BotCommand;

/// Introduction sent for `/start`
pub const START_TEXT: &str = "Hello! I am WeatherBot, your personal weather assistant.\n\
I can provide you with the current weather and a graphical representation of the temperature and humidity.\n\n\
You can use the following command to interact with me:\n\
- `/weather [city name]`: Get the weather for any city and see a graphical representation.";

/// Command overview sent for `/help`
pub const HELP_TEXT: &str = "Need help? Here are the commands you can use:\n\
- `/start`: Start the bot and get an introduction.\n\
- `/weather [city name]`: Get the weather for any city and see a graphical representation.\n\
- `/help`: Display this help message.\n\
- `/menu`: Display all available commands.";

/// Command list sent for `/menu`
pub const MENU_TEXT: &str = "Here are all the available commands:\n\
- `/start`: Start the bot and get an introduction.\n\
- `/weather [city name]`: Get the weather for any city and see a graphical representation.\n\
- `/help`: Display help information.\n\
- `/menu`: Display all available commands.";

/// Fixed reply text for a command, `None` for `/weather`
#[must_use]
pub const fn static_text(command: &BotCommand) -> Option<&'static str> {
    match command {
        BotCommand::Start => Some(START_TEXT),
        BotCommand::Help => Some(HELP_TEXT),
        BotCommand::Menu => Some(MENU_TEXT),
        BotCommand::Weather { .. } => None,
    }
}
