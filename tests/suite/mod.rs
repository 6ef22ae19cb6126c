mod cli;
mod context_switch;
mod menu;
mod scroll_spy;
