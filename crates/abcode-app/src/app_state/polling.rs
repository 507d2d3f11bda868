//! Draining background sources and scheduling the next wake-up.

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::AbcodeApp;
use super::types::POLL_INTERVAL;

impl AbcodeApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_commands(event_loop);
        self.poll_saves(event_loop);
        self.poll_panel_events();
        self.dashboard.tick(Instant::now());

        let mut wake = Instant::now() + POLL_INTERVAL;
        if let Some(deadline) = self.dashboard.next_deadline() {
            wake = wake.min(deadline);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }

    /// Route webview events (IPC, page loads, disposal) to the dashboard.
    pub(super) fn poll_panel_events(&mut self) {
        let Some(manager) = &self.webviews else {
            return;
        };
        for event in manager.drain_events() {
            self.dashboard.handle_event(event, Instant::now());
        }
    }

    fn poll_saves(&mut self, event_loop: &ActiveEventLoop) {
        let mut saved = Vec::new();
        if let Some(rx) = &self.save_rx {
            loop {
                match rx.try_recv() {
                    Ok(path) => saved.push(path),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::warn!("Save watcher disconnected");
                        self.save_rx = None;
                        break;
                    }
                }
            }
        }
        for path in saved {
            self.handle_save(path, event_loop);
        }
    }

    fn poll_commands(&mut self, event_loop: &ActiveEventLoop) {
        let mut commands = Vec::new();
        if let Some(rx) = &self.command_rx {
            loop {
                match rx.try_recv() {
                    Ok(cmd) => commands.push(cmd),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::debug!("Console closed");
                        self.command_rx = None;
                        break;
                    }
                }
            }
        }
        for command in commands {
            self.handle_command(command, event_loop);
        }
    }
}
