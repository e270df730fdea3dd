use log::debug;

use crate::error::ControllerError;

use super::TraversalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    List,
    Retrieve,
}

/// Picks the remote directory for the current request and updates
/// `cursor`/`visited`. `None` keeps the connection-time working directory.
///
/// Rules, first match wins:
/// 1. `cursor > 0`: enter `subdirectories[cursor - 1]` under the root. A
///    listing marks it visited; a retrieval with `finish` set after every
///    subdirectory was visited closes the cycle (`cursor = -1`).
/// 2. root with `finish` unset: enter the root.
/// 3. root with `finish` set: restart the cycle and enter the root.
/// 4. no root: stay where the session landed.
pub fn select_path(
    state: &mut TraversalState,
    kind: OperationKind,
    default_dir_path: Option<&str>,
    finish: bool,
) -> Result<Option<String>, ControllerError> {
    // una stringa vuota equivale a nessuna radice
    let root = default_dir_path.filter(|p| !p.is_empty());

    if state.cursor > 0 {
        let name = state
            .current_subdirectory()
            .map(|dir| dir.name.clone())
            .ok_or(ControllerError::StaleCursor {
                cursor: state.cursor,
                available: state.subdirectories.len(),
            })?;

        let path = match root {
            Some(root) => format!("{}/{}", root, name),
            None => name.clone(),
        };

        if kind == OperationKind::List {
            state.visited.push(name);
        }

        if kind == OperationKind::Retrieve
            && finish
            && state.visited.len() == state.subdirectories.len()
        {
            debug!("All {} subdirectories visited, cycle finished", state.visited.len());
            state.cursor = -1;
            state.visited.clear();
        }

        return Ok(Some(path));
    }

    match root {
        Some(root) if !finish => Ok(Some(root.to_string())),
        Some(root) => {
            debug!("Restarting traversal from {}", root);
            state.cursor = 0;
            state.visited.clear();
            Ok(Some(root.to_string()))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_info::IndexedName;

    fn state_with(names: &[&str], cursor: i64) -> TraversalState {
        let mut state = TraversalState::default();
        for name in names {
            IndexedName::push(&mut state.subdirectories, name);
        }
        state.cursor = cursor;
        state
    }

    #[test]
    fn no_root_at_cursor_zero_changes_nothing() {
        for kind in [OperationKind::List, OperationKind::Retrieve] {
            for finish in [false, true] {
                let mut state = state_with(&["pets"], 0);
                state.visited.push("pets".into());
                let before = state.clone();

                assert_eq!(select_path(&mut state, kind, None, finish).unwrap(), None);
                assert_eq!(state, before);
            }
        }
    }

    #[test]
    fn root_first_pass() {
        let mut state = state_with(&[], 0);
        let path = select_path(&mut state, OperationKind::List, Some("photos"), false).unwrap();
        assert_eq!(path.as_deref(), Some("photos"));
        assert_eq!(state, state_with(&[], 0));
    }

    #[test]
    fn root_restart_clears_visited() {
        let mut state = state_with(&["pets"], 0);
        state.visited.push("pets".into());

        let path = select_path(&mut state, OperationKind::Retrieve, Some("photos"), true).unwrap();
        assert_eq!(path.as_deref(), Some("photos"));
        assert_eq!(state.cursor, 0);
        assert!(state.visited.is_empty());
    }

    #[test]
    fn subdirectory_under_root() {
        let mut state = state_with(&["pets", "vacation"], 2);
        let path = select_path(&mut state, OperationKind::Retrieve, Some("photos"), false).unwrap();
        assert_eq!(path.as_deref(), Some("photos/vacation"));
    }

    #[test]
    fn subdirectory_without_root() {
        let mut state = state_with(&["pets"], 1);
        let path = select_path(&mut state, OperationKind::Retrieve, None, false).unwrap();
        assert_eq!(path.as_deref(), Some("pets"));
    }

    #[test]
    fn listing_marks_exactly_one_visit() {
        let mut state = state_with(&["pets", "vacation", "work"], 2);
        select_path(&mut state, OperationKind::List, Some("photos"), false).unwrap();
        assert_eq!(state.visited, vec!["vacation".to_string()]);

        state.cursor = 3;
        select_path(&mut state, OperationKind::List, Some("photos"), true).unwrap();
        assert_eq!(state.visited, vec!["vacation".to_string(), "work".to_string()]);
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn retrieval_does_not_mark_visits() {
        let mut state = state_with(&["pets"], 1);
        select_path(&mut state, OperationKind::Retrieve, None, false).unwrap();
        assert!(state.visited.is_empty());
    }

    #[test]
    fn cycle_completes_after_last_directory() {
        let mut state = state_with(&["pets", "vacation"], 2);
        state.visited = vec!["pets".into(), "vacation".into()];

        let path = select_path(&mut state, OperationKind::Retrieve, Some("photos"), true).unwrap();
        // la richiesta corrente usa ancora la sottodirectory
        assert_eq!(path.as_deref(), Some("photos/vacation"));
        assert_eq!(state.cursor, -1);
        assert!(state.visited.is_empty());
    }

    #[test]
    fn cycle_not_complete_without_finish_flag() {
        let mut state = state_with(&["pets"], 1);
        state.visited = vec!["pets".into()];

        select_path(&mut state, OperationKind::Retrieve, Some("photos"), false).unwrap();
        assert_eq!(state.cursor, 1);
        assert_eq!(state.visited.len(), 1);
    }

    #[test]
    fn negative_cursor_falls_back_to_root() {
        let mut state = state_with(&["pets"], -1);
        let path = select_path(&mut state, OperationKind::List, Some("photos"), false).unwrap();
        assert_eq!(path.as_deref(), Some("photos"));
        assert_eq!(state.cursor, -1);
    }

    #[test]
    fn empty_root_is_unset() {
        let mut state = state_with(&[], 0);
        let path = select_path(&mut state, OperationKind::List, Some(""), false).unwrap();
        assert_eq!(path, None);
    }

    #[test]
    fn cursor_past_subdirectories_is_stale() {
        let mut state = state_with(&["pets"], 2);
        let result = select_path(&mut state, OperationKind::List, None, false);
        assert!(matches!(
            result,
            Err(ControllerError::StaleCursor { cursor: 2, available: 1 })
        ));
        assert!(state.visited.is_empty());
    }
}
