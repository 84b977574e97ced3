//! Command execution against the users screen.

use std::io::Write;

use domain::models::{
    EditableField, FieldKind, ReferenceDataCache, ReferenceEntry, ReferenceKind, UserId,
};
use domain::services::{AuthProvider, RemoteUserStore, ScreenError, UsersScreen};
use tracing::{debug, info};

use crate::cli::{Command, EditArgs, ListArgs};
use crate::error::CliError;
use crate::prompt::Prompter;
use crate::render;

/// Console application: one screen, one token source, one prompter.
pub struct App<S> {
    screen: UsersScreen<S>,
    auth: Box<dyn AuthProvider>,
    prompter: Box<dyn Prompter>,
}

impl<S: RemoteUserStore> App<S> {
    pub fn new(
        screen: UsersScreen<S>,
        auth: Box<dyn AuthProvider>,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        Self {
            screen,
            auth,
            prompter,
        }
    }

    pub fn screen(&self) -> &UsersScreen<S> {
        &self.screen
    }

    /// Load the screen and run one command, writing results to `out`.
    pub async fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<(), CliError> {
        self.screen.load().await?;

        match command {
            Command::List(args) => self.list(args, out),
            Command::Stats => {
                write!(out, "{}", render::statistics(&self.screen.statistics()))?;
                Ok(())
            }
            Command::Options => {
                write!(out, "{}", render::options(self.screen.references()))?;
                Ok(())
            }
            Command::Show { id } => {
                let record = self
                    .screen
                    .users()
                    .get(id)
                    .ok_or_else(|| ScreenError::NotFound(id.clone()))?;
                write!(out, "{}", render::record(record))?;
                Ok(())
            }
            Command::Edit(args) => self.edit(args, out).await,
            Command::Delete { id, yes } => self.delete(id, *yes, out).await,
        }
    }

    fn list<W: Write>(&mut self, args: &ListArgs, out: &mut W) -> Result<(), CliError> {
        self.screen.set_filter(args.filter_state());
        debug!(filter = ?self.screen.filter(), precedence = ?self.screen.precedence(), "Listing users");

        write!(out, "{}", render::statistics(&self.screen.statistics()))?;
        writeln!(out)?;
        if self.screen.users().is_empty() {
            writeln!(out, "{}", render::NO_USERS)?;
        } else {
            write!(out, "{}", render::users(&self.screen.visible_rows(), args.expanded))?;
        }
        Ok(())
    }

    async fn edit<W: Write>(&mut self, args: &EditArgs, out: &mut W) -> Result<(), CliError> {
        let references = self.screen.references().clone();

        let mut lookups = Vec::new();
        for (kind, query, clear) in [
            (
                ReferenceKind::Directorate,
                args.directorate.as_deref(),
                args.clear_directorate,
            ),
            (
                ReferenceKind::DeputyMinistry,
                args.deputy.as_deref(),
                args.clear_deputy,
            ),
        ] {
            if clear {
                lookups.push((kind, None));
            } else if let Some(query) = query {
                let entry = self.resolve_lookup(&references, kind, query, args.interactive)?;
                lookups.push((kind, Some((query, entry))));
            }
        }

        for (field, value) in &args.assignments {
            check_reference_choice(&references, *field, value)?;
        }

        let session = self.screen.begin_edit(&args.id)?;
        for (field, value) in &args.assignments {
            session.set_field(*field, value)?;
        }
        for (kind, selection) in lookups {
            match selection {
                Some((query, entry)) => {
                    session.set_query(kind, query);
                    session.select(kind, Some(entry));
                }
                None => session.select(kind, None),
            }
        }

        let updated = self.screen.save_edit(self.auth.as_ref()).await?;
        writeln!(out, "User {} updated.", updated.id)?;
        write!(out, "{}", render::record(&updated))?;
        Ok(())
    }

    /// Resolve a lookup query to one entry: an exact name wins, then a single
    /// candidate, then an interactive pick.
    fn resolve_lookup(
        &self,
        references: &ReferenceDataCache,
        kind: ReferenceKind,
        query: &str,
        interactive: bool,
    ) -> Result<ReferenceEntry, CliError> {
        let candidates = references.search(kind, query);

        if let Some(exact) = candidates
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(query.trim()))
        {
            return Ok((*exact).clone());
        }

        match candidates.as_slice() {
            [] => Err(CliError::InvalidArgument(format!(
                "No {} matches '{}'",
                kind, query
            ))),
            [only] => Ok((*only).clone()),
            many if interactive => {
                let names: Vec<String> = many.iter().map(|e| e.name.clone()).collect();
                self.prompter
                    .choose(&format!("Select a {}", kind), &names)?
                    .and_then(|choice| many.get(choice))
                    .map(|entry| (*entry).clone())
                    .ok_or_else(|| CliError::InvalidArgument(format!("No {} selected", kind)))
            }
            many => {
                let names: Vec<&str> = many.iter().map(|e| e.name.as_str()).collect();
                Err(CliError::InvalidArgument(format!(
                    "'{}' matches several entries ({}), refine the query or use --interactive",
                    query,
                    names.join(", ")
                )))
            }
        }
    }

    async fn delete<W: Write>(&mut self, id: &UserId, yes: bool, out: &mut W) -> Result<(), CliError> {
        let name = self
            .screen
            .users()
            .get(id)
            .map(|r| r.name.clone())
            .ok_or_else(|| ScreenError::NotFound(id.clone()))?;

        if !yes {
            let confirmed = self
                .prompter
                .confirm(&format!("Are you sure you want to delete {} ({})?", name, id))?;
            if !confirmed {
                info!(user_id = %id, "Delete cancelled");
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
        }

        self.screen.delete(id, self.auth.as_ref()).await?;
        writeln!(out, "User {} deleted.", id)?;
        Ok(())
    }
}

/// Employment type must name one of the loaded options, when any are loaded.
fn check_reference_choice(
    references: &ReferenceDataCache,
    field: EditableField,
    value: &str,
) -> Result<(), CliError> {
    let FieldKind::ReferenceChoice(kind) = field.kind() else {
        return Ok(());
    };
    let options = references.options(kind);
    if value.is_empty() || options.is_empty() || options.iter().any(|e| e.name == value) {
        return Ok(());
    }
    let names: Vec<&str> = options.iter().map(|e| e.name.as_str()).collect();
    Err(CliError::InvalidArgument(format!(
        "Unknown {} '{}', expected one of: {}",
        kind,
        value,
        names.join(", ")
    )))
}
