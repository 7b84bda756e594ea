use crate::domain::models::{Command, CommandNode, Folder, FolderNode, Node};
use crate::domain::mutations;
use crate::domain::reorder::{self, MovePlan};
use crate::domain::store::FolderStore;
use crate::domain::tree::{get_children, TreeNotifier};
use crate::error::{LauncherError, LauncherResult};
use tracing::{debug, info};

/// Runs every user action as load, mutate, save, notify.
///
/// There is no locking: two actions racing each other both write the whole
/// collection, and the last write wins.
#[derive(Clone)]
pub struct Launcher {
    store: FolderStore,
    notifier: TreeNotifier,
}

impl Launcher {
    pub fn new(store: FolderStore, notifier: TreeNotifier) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &FolderStore {
        &self.store
    }

    pub fn notifier(&self) -> &TreeNotifier {
        &self.notifier
    }

    pub async fn folders(&self) -> LauncherResult<Vec<Folder>> {
        self.store.load().await
    }

    pub async fn children(&self, node: Option<&Node>) -> LauncherResult<Vec<Node>> {
        let folders = self.store.load().await?;
        Ok(get_children(&folders, node))
    }

    /// Writes back the normalized collection so the default folder exists on
    /// disk from the first run.
    pub async fn initialize(&self) -> LauncherResult<()> {
        let folders = self.store.load().await?;
        self.store.save(&folders).await
    }

    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Vec<Folder>) -> LauncherResult<T>,
    ) -> LauncherResult<T> {
        let mut folders = self.store.load().await?;
        let out = change(&mut folders)?;
        self.store.save(&folders).await?;
        self.notifier.notify();
        Ok(out)
    }

    pub async fn add_folder(&self, name: &str) -> LauncherResult<()> {
        self.mutate(|folders| mutations::add_folder(folders, name))
            .await?;
        info!(name, "added folder");
        Ok(())
    }

    /// Returns `false` when nothing changed.
    pub async fn rename_folder(&self, node: &FolderNode, new_name: &str) -> LauncherResult<bool> {
        mutations::ensure_unprotected(node, "renamed")?;
        if node.name == new_name {
            return Ok(false);
        }
        self.mutate(|folders| mutations::rename_folder(folders, node, new_name))
            .await?;
        info!(from = %node.name, to = new_name, "renamed folder");
        Ok(true)
    }

    pub async fn delete_folder(&self, node: &FolderNode) -> LauncherResult<()> {
        mutations::ensure_unprotected(node, "deleted")?;
        let removed = self
            .mutate(|folders| mutations::delete_folder(folders, node))
            .await?;
        info!(name = %removed.name, commands = removed.commands.len(), "deleted folder");
        Ok(())
    }

    pub async fn add_command(&self, folder: &FolderNode, command: Command) -> LauncherResult<()> {
        self.mutate(|folders| mutations::add_command(folders, folder, command))
            .await?;
        info!(folder = %folder.name, "added command");
        Ok(())
    }

    pub async fn edit_command(&self, node: &CommandNode, command: Command) -> LauncherResult<()> {
        self.mutate(|folders| mutations::edit_command(folders, node, command))
            .await
    }

    pub async fn delete_command(&self, node: &CommandNode) -> LauncherResult<()> {
        self.mutate(|folders| mutations::delete_command(folders, node))
            .await?;
        info!(label = %node.label, "deleted command");
        Ok(())
    }

    pub async fn move_command_to(&self, node: &CommandNode, destination: usize) -> LauncherResult<()> {
        self.mutate(|folders| mutations::move_command_to(folders, node, destination))
            .await
    }

    /// Applies a drop. Returns `false` when the target folder vanished in the
    /// meantime, in which case nothing is written.
    pub async fn move_item(&self, plan: &MovePlan) -> LauncherResult<bool> {
        let result = self
            .mutate(|folders| {
                let snapshot = std::mem::take(folders);
                *folders = reorder::move_item(
                    snapshot,
                    &plan.item,
                    plan.target.as_ref(),
                    plan.new_index,
                )?;
                Ok(())
            })
            .await;

        match result {
            Ok(()) => {
                info!(item = %plan.item, index = plan.new_index, "moved item");
                Ok(true)
            }
            Err(LauncherError::Lookup(name)) => {
                debug!(folder = %name, "drop target no longer exists, ignoring move");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn export_json(&self) -> LauncherResult<String> {
        let folders = self.store.load().await?;
        mutations::export_json(&folders)
    }

    /// Overwrites the whole collection.
    pub async fn replace_all(&self, folders: Vec<Folder>) -> LauncherResult<()> {
        let count = folders.len();
        self.mutate(move |current| {
            *current = folders;
            Ok(())
        })
        .await?;
        info!(folders = count, "replaced folder collection");
        Ok(())
    }
}
