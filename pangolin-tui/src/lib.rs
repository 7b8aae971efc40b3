pub mod app;

pub mod cli;

pub mod client;

pub mod config;

pub mod event;

pub mod export;

pub mod handler;

pub mod help;

pub mod notification;

pub mod section;

pub mod tui;

pub mod ui;
