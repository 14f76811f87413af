//! Transient notices in the bottom-right corner

use std::time::{Duration, Instant};

use eframe::egui;

use crate::plugin::api::Notice;

/// Notices currently on screen with their expiry times
#[derive(Debug, Default)]
pub struct NoticeStack {
    entries: Vec<(Notice, Instant)>,
}

impl NoticeStack {
    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    fn push_at(&mut self, notice: Notice, now: Instant) {
        tracing::info!("Notice: {}", notice.message);
        let expires = now + notice.duration;
        self.entries.push((notice, expires));
    }

    /// Drop expired notices
    fn prune(&mut self, now: Instant) {
        self.entries.retain(|(_, expires)| *expires > now);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.entries.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (notice, _) in &self.entries {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(&notice.message);
                    });
                }
            });

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
