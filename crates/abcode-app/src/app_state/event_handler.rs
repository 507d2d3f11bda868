//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::AbcodeApp;

impl ApplicationHandler for AbcodeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.initialized {
            return;
        }
        self.initialize();

        if self.open_on_start {
            self.open_dashboard(event_loop);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(panel) = self.dashboard.panel_mut() else {
            return;
        };
        if panel.window_id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Dashboard close requested");
                panel.close_requested();
                self.poll_panel_events();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    panel.sync_bounds();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                panel.sync_bounds();
            }

            WindowEvent::Occluded(occluded) => {
                panel.visibility_changed(!occluded);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            self.shutdown();
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}
