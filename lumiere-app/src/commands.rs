//! Manual button presses scheduled by tick, e.g. `120:explode`.

use crate::errors::AppError;
use lumiere_data::ManualCommand;
use std::collections::VecDeque;
use std::str::FromStr;

/// A manual command pressed at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledCommand {
    pub tick: u64,
    pub command: ManualCommand,
}

impl FromStr for ScheduledCommand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, name) = s
            .split_once(':')
            .ok_or_else(|| AppError::Command(format!("expected FRAME:COMMAND, got '{s}'")))?;
        let tick = tick
            .trim()
            .parse()
            .map_err(|_| AppError::Command(format!("invalid frame '{tick}'")))?;
        let command = match name.trim().to_ascii_lowercase().as_str() {
            "tree" => ManualCommand::ShowTree,
            "explode" => ManualCommand::Explode,
            other => {
                return Err(AppError::Command(format!(
                    "unknown command '{other}' (expected tree or explode)"
                )));
            }
        };
        Ok(Self { tick, command })
    }
}

/// Commands ordered by tick.
#[derive(Debug, Default)]
pub struct CommandSchedule {
    pending: VecDeque<ScheduledCommand>,
}

impl CommandSchedule {
    pub fn new(mut commands: Vec<ScheduledCommand>) -> Self {
        commands.sort_by_key(|c| c.tick);
        Self {
            pending: commands.into(),
        }
    }

    /// Commands due at or before `tick`, oldest first.
    pub fn due(&mut self, tick: u64) -> Vec<ManualCommand> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|c| c.tick <= tick) {
            if let Some(scheduled) = self.pending.pop_front() {
                due.push(scheduled.command);
            }
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            "12:explode".parse::<ScheduledCommand>().unwrap(),
            ScheduledCommand {
                tick: 12,
                command: ManualCommand::Explode
            }
        );
        assert_eq!(
            " 0 : TREE".parse::<ScheduledCommand>().unwrap().command,
            ManualCommand::ShowTree
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("explode".parse::<ScheduledCommand>().is_err());
        assert!("x:explode".parse::<ScheduledCommand>().is_err());
        assert!("3:focus".parse::<ScheduledCommand>().is_err());
    }

    #[test]
    fn test_schedule_orders_by_tick() {
        let mut schedule = CommandSchedule::new(vec![
            "10:tree".parse().unwrap(),
            "2:explode".parse().unwrap(),
            "10:explode".parse().unwrap(),
        ]);
        assert!(schedule.due(1).is_empty());
        assert_eq!(schedule.due(5), vec![ManualCommand::Explode]);
        assert_eq!(schedule.due(10), vec![ManualCommand::ShowTree, ManualCommand::Explode]);
        assert!(schedule.is_empty());
    }
}
