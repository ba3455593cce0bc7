pub mod dispatcher;

mod adallow;
mod help;
mod linkaccounts;
mod mapmessages;
mod mute;
mod unlinkaccount;
mod warn;
mod whois;

use std::sync::Arc;

use crate::commands::dispatcher::Dispatcher;

/// Build the command roster.
pub fn build_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::default();

    dispatcher.register("help", Arc::new(help::Help));
    dispatcher.register("mute", Arc::new(mute::Mute));
    dispatcher.register("warn", Arc::new(warn::Warn));
    dispatcher.register("adallow", Arc::new(adallow::AdAllow));
    dispatcher.register("mapmessages", Arc::new(mapmessages::MapMessages));
    dispatcher.register("linkaccounts", Arc::new(linkaccounts::LinkAccounts));
    dispatcher.register("unlinkaccount", Arc::new(unlinkaccount::UnlinkAccount));
    dispatcher.register("whois", Arc::new(whois::WhoIs));

    dispatcher
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_is_complete() {
        let dispatcher = build_dispatcher();

        for name in [
            "help",
            "mute",
            "warn",
            "adallow",
            "mapmessages",
            "linkaccounts",
            "unlinkaccount",
            "whois",
        ] {
            assert!(dispatcher.get(name).is_some(), "missing command {}", name);
        }
    }

    #[test]
    fn test_only_help_and_whois_are_open_to_members() {
        let dispatcher = build_dispatcher();

        for (name, command) in dispatcher.entries() {
            let open = !command.staff_only();
            assert_eq!(open, name == "help" || name == "whois", "command {}", name);
        }
    }
}
