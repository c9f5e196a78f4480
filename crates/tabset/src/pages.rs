//! The three pages of the settings screen

use crate::settings::{advanced_bindings, general_bindings, performance_bindings, SharedSettings};
use tabset_core::{
    display_settings, CoreResult, ElementAttrs, ElementId, Logger, LoggerRegistry, MessageBus,
    Setting, SettingsTabPage, WidgetHost,
};

type BuildBindings = fn(&SharedSettings, &MessageBus) -> CoreResult<Vec<Box<dyn Setting>>>;

/// A page listing one group of bindings under a heading
pub struct BindingsPage {
    name: &'static str,
    heading: &'static str,
    build: BuildBindings,
    settings: SharedSettings,
    bus: MessageBus,
    log: Logger,
}

impl BindingsPage {
    fn new(
        name: &'static str,
        heading: &'static str,
        build: BuildBindings,
        settings: &SharedSettings,
        bus: &MessageBus,
        registry: &LoggerRegistry,
    ) -> Self {
        BindingsPage {
            name,
            heading,
            build,
            settings: settings.clone(),
            bus: bus.clone(),
            log: registry.get_or_create(&format!("page.{}", name.to_lowercase())),
        }
    }
}

impl SettingsTabPage for BindingsPage {
    fn name(&self) -> &str {
        self.name
    }

    fn on_activate(&mut self) {
        self.log.debug(format_args!("{} page shown", self.name));
    }

    fn on_deactivate(&mut self) {
        self.log.debug(format_args!("{} page hidden", self.name));
    }

    fn display(&mut self, host: &mut dyn WidgetHost, container: ElementId) -> CoreResult<()> {
        host.create_child(container, "h3", ElementAttrs::text(self.heading))?;
        let bindings = (self.build)(&self.settings, &self.bus)?;
        display_settings(&bindings, host, container)?;
        Ok(())
    }
}

/// General, Performance and Advanced, in tab order
pub fn all_pages(
    settings: &SharedSettings,
    bus: &MessageBus,
    registry: &LoggerRegistry,
) -> Vec<Box<dyn SettingsTabPage>> {
    vec![
        Box::new(BindingsPage::new(
            "General",
            "Synchronisation and appearance",
            general_bindings,
            settings,
            bus,
            registry,
        )),
        Box::new(BindingsPage::new(
            "Performance",
            "Background work",
            performance_bindings,
            settings,
            bus,
            registry,
        )),
        Box::new(BindingsPage::new(
            "Advanced",
            "Server and diagnostics",
            advanced_bindings,
            settings,
            bus,
            registry,
        )),
    ]
}
