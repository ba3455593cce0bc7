use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{Context, Message};
use serenity::async_trait;
use tracing::{error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::utils::permissions;

/// Everything a command handler gets to work with.
pub struct CommandContext<'a> {
    pub ctx: &'a Context,
    pub data: &'a Arc<Data>,
    pub msg: &'a Message,
    /// Whitespace-split tokens after the command name.
    pub args: Vec<&'a str>,
}

/// A chat command, registered with the dispatcher under a name.
#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error>;

    /// Usage line shown on misuse, without the prefix.
    fn usage(&self) -> &'static str;

    /// One-line summary for the help roster.
    fn description(&self) -> &'static str;

    /// Whether the invoker must hold the staff role.
    fn staff_only(&self) -> bool {
        true
    }
}

/// Name → handler registry.
#[derive(Default)]
pub struct Dispatcher {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl Dispatcher {
    /// Register a command under `name`. Names are matched lowercased; a
    /// repeated name silently replaces the earlier handler.
    pub fn register(&mut self, name: &str, command: Arc<dyn Command>) {
        self.commands.insert(name.to_lowercase(), command);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase())
    }

    /// Registered pairs sorted by name, for the help roster.
    pub fn entries(&self) -> Vec<(&str, &Arc<dyn Command>)> {
        let mut entries: Vec<_> = self
            .commands
            .iter()
            .map(|(name, command)| (name.as_str(), command))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }
}

/// Route a prefixed message to its command.
///
/// Misuse (`Error::Usage`) comes back to the invoker with the usage line;
/// any other handler error is logged and acknowledged generically.
pub async fn dispatch(ctx: &Context, data: &Arc<Data>, msg: &Message) -> Result<(), Error> {
    let prefix = &data.settings.command_prefix;

    let stripped = match msg.content.strip_prefix(prefix.as_str()) {
        Some(stripped) => stripped,
        None => return Ok(()),
    };

    let mut parts = stripped.split_whitespace();
    let name = match parts.next() {
        Some(name) => name,
        None => return Ok(()),
    };
    let args: Vec<&str> = parts.collect();

    let command = match data.dispatcher.get(name) {
        Some(command) => Arc::clone(command),
        None => {
            msg.channel_id
                .say(&ctx.http, format!("Unknown command. Try `{}help`.", prefix))
                .await?;
            return Ok(());
        }
    };

    if command.staff_only() && !permissions::is_staff(msg, data.settings.staff_role_id) {
        msg.channel_id
            .say(&ctx.http, "You don't have permission to use that command.")
            .await?;
        return Ok(());
    }

    info!("User {} invoked {}{}", msg.author.id, prefix, name);

    let cmd = CommandContext {
        ctx,
        data,
        msg,
        args,
    };

    match command.execute(&cmd).await {
        Ok(()) => Ok(()),
        Err(Error::Usage(text)) => {
            let reply = format!("{}\nUsage: `{}{}`", text, prefix, command.usage());
            msg.channel_id.say(&ctx.http, reply).await?;
            Ok(())
        }
        Err(e) => {
            error!("Command {}{} failed: {:?}", prefix, name, e);
            msg.channel_id
                .say(&ctx.http, "Something went wrong running that command.")
                .await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(&'static str);

    #[async_trait]
    impl Command for Dummy {
        async fn execute(&self, _cmd: &CommandContext<'_>) -> Result<(), Error> {
            Ok(())
        }

        fn usage(&self) -> &'static str {
            "dummy"
        }

        fn description(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.register("ping", Arc::new(Dummy("first")));

        assert!(dispatcher.get("ping").is_some());
        assert!(dispatcher.get("pong").is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.register("PING", Arc::new(Dummy("first")));

        assert!(dispatcher.get("ping").is_some());
        assert!(dispatcher.get("PiNg").is_some());
    }

    #[test]
    fn test_reregistration_silently_replaces() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.register("ping", Arc::new(Dummy("first")));
        dispatcher.register("ping", Arc::new(Dummy("second")));

        let command = dispatcher.get("ping").expect("registered");
        assert_eq!(command.description(), "second");
        assert_eq!(dispatcher.entries().len(), 1);
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.register("zeta", Arc::new(Dummy("z")));
        dispatcher.register("alpha", Arc::new(Dummy("a")));
        dispatcher.register("mid", Arc::new(Dummy("m")));

        let names: Vec<&str> = dispatcher.entries().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_staff_only_by_default() {
        let dummy = Dummy("first");
        assert!(dummy.staff_only());
    }
}
