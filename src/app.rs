//! Main application state and UI coordination

use std::path::{Path, PathBuf};

use eframe::egui;
use egui_commonmark::CommonMarkCache;

use crate::core::config::AppConfig;
use crate::core::file_system::FileTree;
use crate::core::workspace::{HostWorkspace, LeafContent, LeafId};
use crate::plugin::api::{MarkdownView, Notice, ViewMode};
use crate::plugin::manager::PluginManager;
use crate::ui::{
    command_palette::CommandPalette, editor::EditorPanel, file_tree::FileTreePanel, notice::NoticeStack,
    preview::PreviewPanel, settings::SettingsWindow, tabs::TabBar,
};

/// Main application state
pub struct ForceReadApp {
    /// File tree of the open vault
    pub file_tree: FileTree,
    /// Open tabs
    pub workspace: HostWorkspace,
    /// Plugin manager
    pub plugin_manager: PluginManager,
    /// Application configuration
    pub config: AppConfig,
    /// Whether sidebar is visible
    pub sidebar_visible: bool,
    /// Whether the settings window is open
    pub settings_open: bool,
    pub command_palette: CommandPalette,
    pub notices: NoticeStack,
    /// Commonmark cache for reading mode
    pub commonmark_cache: CommonMarkCache,
}

impl ForceReadApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, vault: Option<PathBuf>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });

        let mut plugin_manager = PluginManager::with_builtin(config.plugin_data_dir());
        plugin_manager.enable_all_except(&config.plugins.disabled_plugins);

        let mut app = Self {
            file_tree: FileTree::default(),
            workspace: HostWorkspace::default(),
            plugin_manager,
            config,
            sidebar_visible: true,
            settings_open: false,
            command_palette: CommandPalette::default(),
            notices: NoticeStack::default(),
            commonmark_cache: CommonMarkCache::default(),
        };

        if let Some(path) = vault.or_else(|| app.config.last_vault.clone()) {
            if path.is_dir() {
                app.open_vault(path);
            } else {
                tracing::warn!("Vault not found: {}", path.display());
            }
        }
        app
    }

    /// Open a vault (workspace directory), saving and closing every tab.
    /// The current vault stays open if an edited document cannot be saved.
    pub fn open_vault(&mut self, path: PathBuf) {
        if let Err(e) = self.workspace.clear() {
            tracing::error!("Failed to save open documents: {:#}", e);
            self.notices.push(Notice::new("Could not save open documents, vault not switched"));
            return;
        }
        tracing::info!("Opening vault: {}", path.display());
        self.file_tree = FileTree::from_path(&path);
        self.config.last_vault = Some(path.clone());
        self.config.add_recent_vault(path);
        self.save_config();
    }

    pub fn vault_root(&self) -> Option<&Path> {
        self.file_tree.root_path()
    }

    /// Open a file in the workspace
    pub fn open_file(&mut self, path: &Path) {
        let root = self.vault_root().map(Path::to_path_buf);
        if let Err(e) = self
            .workspace
            .open_file(path, root.as_deref(), self.config.editor.default_mode)
        {
            tracing::error!("Failed to open {}: {:#}", path.display(), e);
            self.notices.push(Notice::new(format!("Could not open {}", path.display())));
        }
    }

    /// Save the active document
    pub fn save_active_document(&mut self) {
        let Some(leaf) = self.workspace.active_leaf_mut() else {
            return;
        };
        if let LeafContent::Markdown(view) = &mut leaf.content {
            if let Err(e) = view.document.save() {
                tracing::error!("Failed to save document: {:#}", e);
                self.notices.push(Notice::new("Failed to save document"));
            }
        }
    }

    /// Close a tab, saving its document first
    pub fn close_leaf(&mut self, id: LeafId) {
        if let Err(e) = self.workspace.close(id) {
            tracing::error!("Failed to save before closing: {:#}", e);
            self.notices.push(Notice::new("Failed to save document, tab kept open"));
        }
    }

    /// Switch the active markdown tab between reading and source mode
    pub fn toggle_active_mode(&mut self) {
        if let Some(leaf) = self.workspace.active_leaf_mut() {
            if let LeafContent::Markdown(view) = &mut leaf.content {
                let mode = view.mode().toggled();
                view.set_mode(mode);
            }
        }
    }

    /// Run a command from the palette
    pub fn run_command(&mut self, id: &str) {
        self.plugin_manager.execute_command(id, &mut self.workspace);
        self.collect_notices();
    }

    fn collect_notices(&mut self) {
        for notice in self.plugin_manager.take_notices() {
            self.notices.push(notice);
        }
    }

    /// Tell plugins about layout changes made this frame
    fn dispatch_layout_change(&mut self, ctx: &egui::Context) {
        if self.workspace.take_layout_change() {
            tracing::debug!("Layout changed, {} leaves open", self.workspace.leaves().len());
            self.plugin_manager.on_layout_change(&mut self.workspace);
            self.collect_notices();
            ctx.request_repaint();
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {:#}", e);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Vault...").clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_folder() {
                            self.open_vault(path);
                        }
                        ui.close();
                    }
                    let recent: Vec<PathBuf> = self.config.recent_vaults.clone();
                    ui.add_enabled_ui(!recent.is_empty(), |ui| {
                        ui.menu_button("Open Recent", |ui| {
                            for path in recent {
                                if ui.button(path.display().to_string()).clicked() {
                                    self.open_vault(path);
                                    ui.close();
                                }
                            }
                        });
                    });
                    if ui.button("Save").clicked() {
                        self.save_active_document();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Settings...").clicked() {
                        self.settings_open = true;
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Toggle Sidebar").clicked() {
                        self.sidebar_visible = !self.sidebar_visible;
                        ui.close();
                    }
                    if ui.button("Toggle Reading Mode").clicked() {
                        self.toggle_active_mode();
                        ui.close();
                    }
                    if ui.button("Command Palette...").clicked() {
                        self.command_palette.toggle();
                        ui.close();
                    }
                });

                ui.menu_button("Commands", |ui| {
                    for command in self.plugin_manager.commands() {
                        if ui.button(&command.name).clicked() {
                            self.run_command(&command.id);
                            ui.close();
                        }
                    }
                });
            });
        });
    }

    /// Vault path, mode and cursor of the active tab
    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.workspace.active_leaf().map(|l| &l.content) {
                    Some(LeafContent::Markdown(view)) => {
                        let state = view.state();
                        ui.label(view.file_path().unwrap_or("(outside vault)"));
                        ui.separator();
                        ui.label(state.mode.label());
                        if let Some(cursor) = state.cursor {
                            ui.separator();
                            ui.label(format!("Char {}", cursor));
                        }
                    }
                    Some(LeafContent::File(view)) => {
                        ui.label(view.path.display().to_string());
                    }
                    _ => {
                        let vault = self
                            .vault_root()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "No vault".to_string());
                        ui.label(vault);
                    }
                }
            });
        });
    }

    fn render_active_leaf(&mut self, ui: &mut egui::Ui) {
        let font_size = self.config.editor.font_size;
        let Some(leaf) = self.workspace.active_leaf_mut() else {
            EditorPanel::show_welcome(ui);
            return;
        };
        let id = leaf.id;
        match &mut leaf.content {
            LeafContent::Markdown(view) => match view.mode() {
                ViewMode::Source => EditorPanel::show(ui, id, view, font_size),
                ViewMode::Preview => PreviewPanel::show(ui, id, view, &mut self.commonmark_cache),
            },
            LeafContent::File(view) => PreviewPanel::show_file(ui, view),
            LeafContent::Empty => EditorPanel::show_welcome(ui),
        }
    }
}

impl eframe::App for ForceReadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (save, toggle_mode, palette, sidebar, new_tab, close_tab) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl;
            (
                ctrl && i.key_pressed(egui::Key::S),
                ctrl && i.key_pressed(egui::Key::E),
                ctrl && i.key_pressed(egui::Key::P),
                ctrl && i.key_pressed(egui::Key::B),
                ctrl && i.key_pressed(egui::Key::T),
                ctrl && i.key_pressed(egui::Key::W),
            )
        });
        if save {
            self.save_active_document();
        }
        if toggle_mode {
            self.toggle_active_mode();
        }
        if palette {
            self.command_palette.toggle();
        }
        if sidebar {
            self.sidebar_visible = !self.sidebar_visible;
        }
        if new_tab {
            self.workspace.new_tab();
        }
        if close_tab {
            if let Some(id) = self.workspace.active_id() {
                self.close_leaf(id);
            }
        }

        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);

        if self.sidebar_visible {
            egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(self.config.ui.sidebar_width)
                .min_width(150.0)
                .show(ctx, |ui| {
                    FileTreePanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            TabBar::show(ui, self);
            ui.separator();
            self.render_active_leaf(ui);
        });

        let commands = if self.command_palette.open {
            self.plugin_manager.commands()
        } else {
            Vec::new()
        };
        if let Some(id) = self.command_palette.show(ctx, &commands) {
            self.run_command(&id);
        }

        if self.settings_open
            && SettingsWindow::show(ctx, &mut self.settings_open, &mut self.config, &mut self.plugin_manager)
        {
            self.save_config();
        }

        // Views opened or closed this frame are reconciled before the next
        // frame paints them
        self.dispatch_layout_change(ctx);
        self.notices.show(ctx);
    }
}
