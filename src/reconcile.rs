//! Reconciler
//!
//! Merges the values stored in a settings file into a template object that
//! already holds the default values. Depending on the [`Policy`] the file is
//! created when absent or rewritten when it lacks values, and missing files or
//! all-default objects either fail the call or are reported at `error` level.
//!
//! At most one existence check, one read and one write happen per call. A file
//! created by the call is never read back.

use crate::diagnostics::{DiagnosticSink, Diagnostics};
use crate::error::LoadError;
use crate::options::{Disposition, Policy, WriteOnLoad};
use crate::store::JsonStore;
use crate::value::{display_value, values_equal};
use serde_json::{Map, Value};
use std::path::Path;

pub const OBJECT_IS_DEFAULT: &str = "Object contains only default values.";

/// Reconcile `template` with the settings file at `path`.
///
/// The template keeps exactly its own key set; stored values for known keys
/// replace the defaults in place.
pub fn reconcile<S, D>(
    store: &S,
    diagnostics: &Diagnostics<D>,
    path: &Path,
    template: &mut Map<String, Value>,
    policy: &Policy,
) -> Result<(), LoadError>
where
    S: JsonStore + ?Sized,
    D: DiagnosticSink,
{
    if template.is_empty() {
        return Err(LoadError::EmptyTemplate);
    }
    let file = path.display().to_string();

    let persisted = if store.exists(path) {
        store.read_json(path)?
    } else {
        let create = policy.write_on_load.contains(WriteOnLoad::CREATE);
        let notice = if create {
            store.write_json(path, template)?;
            format!(
                "Settings file '{}' didn't exist, but a scaffolding has been created.",
                file
            )
        } else {
            format!("Settings file '{}' could not be found.", file)
        };

        match policy
            .fail_on_file_not_found
            .resolve(notice, LoadError::FileNotFound)
        {
            Disposition::Fail(err) => return Err(err),
            Disposition::Log(message) => diagnostics.error(message),
        }

        if !create {
            return report_only_default(diagnostics, policy);
        }
        // The scaffold holds the template verbatim.
        template.clone()
    };

    let outcome = merge(diagnostics, &file, template, &persisted);

    if outcome.only_default {
        report_only_default(diagnostics, policy)?;
    }

    let update = policy.write_on_load.contains(WriteOnLoad::UPDATE);
    match (outcome.needs_update, update) {
        (true, true) => {
            diagnostics.info(format!("Updating file '{}' due to missing values.", file));
            store.write_json(path, template)?;
        }
        (true, false) => diagnostics.warn(format!(
            "Values are missing in file '{}', but flag WriteOnLoad::UPDATE has not been set in options.write_on_load.",
            file
        )),
        (false, true) => diagnostics.debug(format!("File '{}' doesn't need to be updated.", file)),
        (false, false) => diagnostics.info(format!("File '{}' won't be updated.", file)),
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MergeOutcome {
    /// No stored value differed from its default and the file had no unknown keys.
    only_default: bool,
    /// The file lacks at least one of the template's keys.
    needs_update: bool,
}

/// Walk the key union, template keys first, then keys only the file knows.
fn merge<D: DiagnosticSink>(
    diagnostics: &Diagnostics<D>,
    file: &str,
    template: &mut Map<String, Value>,
    persisted: &Map<String, Value>,
) -> MergeOutcome {
    let mut outcome = MergeOutcome {
        only_default: true,
        needs_update: false,
    };

    for (key, current) in template.iter_mut() {
        match persisted.get(key) {
            Some(stored) if values_equal(stored, current) => diagnostics.debug(format!(
                "Value '{}' of Property '{}' in object remains unchanged due to value '{}' from file '{}' being equal.",
                display_value(current),
                key,
                display_value(stored),
                file
            )),
            Some(stored) => {
                diagnostics.debug(format!(
                    "Value of Property '{}' is set from '{}' to '{}'.",
                    key,
                    display_value(current),
                    display_value(stored)
                ));
                *current = stored.clone();
                outcome.only_default = false;
            }
            None => {
                diagnostics.debug(format!(
                    "Value for property '{}' wasn't found in file '{}'.",
                    key, file
                ));
                outcome.needs_update = true;
            }
        }
    }

    for key in persisted.keys().filter(|key| !template.contains_key(*key)) {
        diagnostics.debug(format!(
            "Property '{}' wasn't found in object and will be skipped.",
            key
        ));
        outcome.only_default = false;
    }

    outcome
}

fn report_only_default<D: DiagnosticSink>(
    diagnostics: &Diagnostics<D>,
    policy: &Policy,
) -> Result<(), LoadError> {
    match policy
        .fail_on_object_is_default
        .resolve(OBJECT_IS_DEFAULT.to_string(), LoadError::ObjectIsDefault)
    {
        Disposition::Fail(err) => Err(err),
        Disposition::Log(message) => {
            diagnostics.error(message);
            Ok(())
        }
    }
}
