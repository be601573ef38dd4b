// Action model
// A closed set of executable effects bound to clicks and menu-open events,
// parsed from serialized strings via a recognized-prefix grammar.

use thiserror::Error;

use crate::ports::{GameServer, Viewer};
use crate::services::{PlaceholderRegistry, PlaceholderString};
use crate::utils::colorize;
use crate::value_objects::{Material, MenuFileName, SoundSpec};

/// Outcome of one click dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    KeepOpen,
    Close,
}

/// Message shown to viewers when a misconfigured action is triggered.
pub const DISABLED_ACTION_MESSAGE: &str =
    "\u{00A7}cThis menu is configured incorrectly, please inform the staff.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid action '{serialized}': {reason}")]
pub struct ActionParseError {
    pub serialized: String,
    pub reason: String,
}

impl ActionParseError {
    fn new(serialized: &str, reason: impl Into<String>) -> Self {
        Self {
            serialized: serialized.to_string(),
            reason: reason.into(),
        }
    }
}

/// Execution environment handed to actions. Navigation requests are recorded
/// here instead of executed inline, so the engine can defer them to the next
/// scheduling step.
pub struct ActionContext<'a> {
    pub viewer: &'a dyn Viewer,
    pub server: &'a dyn GameServer,
    pub placeholders: &'a PlaceholderRegistry,
    pub navigation: Option<MenuFileName>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        viewer: &'a dyn Viewer,
        server: &'a dyn GameServer,
        placeholders: &'a PlaceholderRegistry,
    ) -> Self {
        Self {
            viewer,
            server,
            placeholders,
            navigation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Default when no prefix is recognized: run a command as the viewer.
    PlayerCommand(PlaceholderString),
    ConsoleCommand(PlaceholderString),
    OpenMenu(MenuFileName),
    CloseMenu,
    Tell(PlaceholderString),
    Broadcast(PlaceholderString),
    PlaySound(SoundSpec),
    GiveItem { material: Material, amount: u8 },
    GiveMoney(f64),
    ChangeServer(PlaceholderString),
    /// Stand-in for an action that failed to parse. Never dropped silently:
    /// triggering it tells the viewer the configuration is broken.
    Disabled { serialized: String },
}

impl Action {
    pub fn parse(serialized: &str) -> Result<Self, ActionParseError> {
        let trimmed = serialized.trim();
        if trimmed.is_empty() {
            return Err(ActionParseError::new(serialized, "action is empty"));
        }
        if trimmed.eq_ignore_ascii_case("close") {
            return Ok(Action::CloseMenu);
        }

        let (prefix, body) = match trimmed.split_once(':') {
            Some((prefix, body)) => (prefix.trim().to_lowercase(), body.trim()),
            None => return Ok(Action::PlayerCommand(Self::template(trimmed))),
        };

        let require_body = |what: &str| -> Result<&str, ActionParseError> {
            if body.is_empty() {
                Err(ActionParseError::new(serialized, format!("{what} is empty")))
            } else {
                Ok(body)
            }
        };

        match prefix.as_str() {
            "console" => Ok(Action::ConsoleCommand(Self::template(require_body(
                "console command",
            )?))),
            "open" => Ok(Action::OpenMenu(MenuFileName::with_yaml_extension(
                require_body("menu name")?,
            ))),
            "tell" => Ok(Action::Tell(Self::template(require_body("message")?))),
            "broadcast" => Ok(Action::Broadcast(Self::template(require_body("message")?))),
            "sound" => {
                let sound = SoundSpec::parse(require_body("sound")?)
                    .map_err(|err| ActionParseError::new(serialized, err.to_string()))?;
                Ok(Action::PlaySound(sound))
            }
            "give" => Self::parse_give_item(serialized, require_body("item")?),
            "give-money" => {
                let amount: f64 = require_body("amount")?.parse().map_err(|_| {
                    ActionParseError::new(serialized, "amount must be a number")
                })?;
                if amount <= 0.0 || !amount.is_finite() {
                    return Err(ActionParseError::new(
                        serialized,
                        "amount must be greater than 0",
                    ));
                }
                Ok(Action::GiveMoney(amount))
            }
            "server" => Ok(Action::ChangeServer(Self::template(require_body(
                "server name",
            )?))),
            // An unknown "word:" prefix is almost always a typo in a
            // recognized one, not a command containing a colon.
            other if !other.contains(' ') && !other.is_empty() => Err(ActionParseError::new(
                serialized,
                format!("unknown action type '{other}'"),
            )),
            _ => Ok(Action::PlayerCommand(Self::template(trimmed))),
        }
    }

    /// The stand-in used by parsers after collecting an ActionParseError.
    pub fn disabled(serialized: &str) -> Self {
        Action::Disabled {
            serialized: serialized.to_string(),
        }
    }

    fn template(text: &str) -> PlaceholderString {
        PlaceholderString::parse(&colorize(text))
    }

    fn parse_give_item(serialized: &str, body: &str) -> Result<Self, ActionParseError> {
        let (material_part, amount_part) = match body.split_once(',') {
            Some((material, amount)) => (material.trim(), Some(amount.trim())),
            None => (body, None),
        };
        let material = Material::parse(material_part)
            .map_err(|err| ActionParseError::new(serialized, err.to_string()))?;
        if material.is_air() {
            return Err(ActionParseError::new(serialized, "cannot give air"));
        }
        let amount = match amount_part {
            Some(raw) => {
                let amount: i64 = raw.parse().map_err(|_| {
                    ActionParseError::new(serialized, "amount must be a number")
                })?;
                if !(1..=127).contains(&amount) {
                    return Err(ActionParseError::new(
                        serialized,
                        "amount must be between 1 and 127",
                    ));
                }
                amount as u8
            }
            None => 1,
        };
        Ok(Action::GiveItem { material, amount })
    }

    /// Runs the effect. Only explicitly closing actions return Close.
    pub fn execute(&self, ctx: &mut ActionContext<'_>) -> ClickResult {
        match self {
            Action::PlayerCommand(command) => {
                let command = command.resolve(ctx.placeholders, ctx.viewer);
                ctx.server.dispatch_player_command(ctx.viewer.id(), &command);
                ClickResult::KeepOpen
            }
            Action::ConsoleCommand(command) => {
                let command = command.resolve(ctx.placeholders, ctx.viewer);
                ctx.server.dispatch_console_command(&command);
                ClickResult::KeepOpen
            }
            Action::OpenMenu(menu) => {
                ctx.navigation = Some(menu.clone());
                ClickResult::KeepOpen
            }
            Action::CloseMenu => ClickResult::Close,
            Action::Tell(message) => {
                ctx.viewer
                    .send_message(&message.resolve(ctx.placeholders, ctx.viewer));
                ClickResult::KeepOpen
            }
            Action::Broadcast(message) => {
                ctx.server
                    .broadcast(&message.resolve(ctx.placeholders, ctx.viewer));
                ClickResult::KeepOpen
            }
            Action::PlaySound(sound) => {
                ctx.server.play_sound(ctx.viewer.id(), sound);
                ClickResult::KeepOpen
            }
            Action::GiveItem { material, amount } => {
                let mut item = crate::entities::ItemSnapshot::new(material.clone());
                item.amount = *amount;
                ctx.server.give_item(ctx.viewer.id(), &item);
                ClickResult::KeepOpen
            }
            Action::GiveMoney(amount) => {
                ctx.server.give_money(ctx.viewer.id(), *amount);
                ClickResult::KeepOpen
            }
            Action::ChangeServer(server) => {
                ctx.server
                    .connect_server(ctx.viewer.id(), &server.resolve(ctx.placeholders, ctx.viewer));
                ClickResult::KeepOpen
            }
            Action::Disabled { .. } => {
                ctx.viewer.send_message(DISABLED_ACTION_MESSAGE);
                ClickResult::KeepOpen
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_strings_parse_as_player_commands() {
        let action = Action::parse("spawn").expect("parse action");
        assert!(matches!(action, Action::PlayerCommand(_)));
    }

    #[test]
    fn recognized_prefixes_map_to_their_variant() {
        assert!(matches!(
            Action::parse("console: say hi").expect("parse"),
            Action::ConsoleCommand(_)
        ));
        assert!(matches!(
            Action::parse("tell: &aWelcome {player}").expect("parse"),
            Action::Tell(_)
        ));
        assert!(matches!(
            Action::parse("CLOSE").expect("parse"),
            Action::CloseMenu
        ));
        match Action::parse("open: shop").expect("parse") {
            Action::OpenMenu(menu) => assert_eq!(menu.as_str(), "shop.yml"),
            other => panic!("unexpected action {other:?}"),
        }
        match Action::parse("give: diamond, 16").expect("parse") {
            Action::GiveItem { material, amount } => {
                assert_eq!(material.as_str(), "diamond");
                assert_eq!(amount, 16);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn parse_errors_name_the_offending_text() {
        let err = Action::parse("sound: click, loud").expect_err("malformed sound");
        assert_eq!(err.serialized, "sound: click, loud");

        let err = Action::parse("give-money: lots").expect_err("malformed amount");
        assert!(err.reason.contains("number"));

        let err = Action::parse("opeen: shop").expect_err("typo prefix");
        assert!(err.reason.contains("opeen"));
    }

    #[test]
    fn commands_containing_colons_still_parse_as_commands() {
        let action = Action::parse("msg Steve see: the docs").expect("parse action");
        assert!(matches!(action, Action::PlayerCommand(_)));
    }

    #[test]
    fn give_money_requires_a_positive_amount() {
        assert!(Action::parse("give-money: 10.5").is_ok());
        assert!(Action::parse("give-money: -1").is_err());
        assert!(Action::parse("give-money: 0").is_err());
    }
}
