use crate::core::patient::Patient;
use std::collections::VecDeque;

/// Waiting room with the priority discipline: urgent patients are served
/// before normal patients regardless of arrival order, and within the same
/// class earlier arrivals leave first.
///
/// A patient is in this queue exactly when it has arrived and has not yet
/// been assigned a server.
#[derive(Debug, Default)]
pub struct WaitingQueue {
    urgent: VecDeque<Patient>,
    normal: VecDeque<Patient>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a patient behind the others of its urgency class.
    pub fn push(&mut self, patient: Patient) {
        if patient.urgent() {
            self.urgent.push_back(patient);
        } else {
            self.normal.push_back(patient);
        }
    }

    /// Dequeue the highest-priority patient: the oldest urgent one if any,
    /// otherwise the oldest normal one.
    pub fn pop_next(&mut self) -> Option<Patient> {
        self.urgent.pop_front().or_else(|| self.normal.pop_front())
    }

    pub fn len(&self) -> usize {
        self.urgent.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.normal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(arrival: f64, urgent: bool) -> Patient {
        Patient::new(arrival, urgent, 25.0).unwrap()
    }

    #[test]
    fn test_urgent_served_before_earlier_normal() {
        let mut queue = WaitingQueue::new();
        queue.push(patient(0.0, false));
        queue.push(patient(1.0, false));
        queue.push(patient(50.0, true));

        let next = queue.pop_next().unwrap();
        assert!(next.urgent());
        assert_eq!(next.arrival_time(), 50.0);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_fifo_within_urgent_class() {
        let mut queue = WaitingQueue::new();
        queue.push(patient(10.0, true));
        queue.push(patient(20.0, true));

        assert_eq!(queue.pop_next().unwrap().arrival_time(), 10.0);
        assert_eq!(queue.pop_next().unwrap().arrival_time(), 20.0);
    }

    #[test]
    fn test_fifo_within_normal_class() {
        let mut queue = WaitingQueue::new();
        queue.push(patient(5.0, false));
        queue.push(patient(15.0, false));
        queue.push(patient(25.0, false));

        assert_eq!(queue.pop_next().unwrap().arrival_time(), 5.0);
        assert_eq!(queue.pop_next().unwrap().arrival_time(), 15.0);
        assert_eq!(queue.pop_next().unwrap().arrival_time(), 25.0);
        assert!(queue.pop_next().is_none());
    }

    #[test]
    fn test_urgent_behind_earlier_urgent() {
        let mut queue = WaitingQueue::new();
        queue.push(patient(0.0, false));
        queue.push(patient(30.0, true));
        queue.push(patient(40.0, true));

        // Urgent patients drain in their own arrival order, then normals.
        assert_eq!(queue.pop_next().unwrap().arrival_time(), 30.0);
        assert_eq!(queue.pop_next().unwrap().arrival_time(), 40.0);
        assert_eq!(queue.pop_next().unwrap().arrival_time(), 0.0);
        assert!(queue.is_empty());
    }
}
