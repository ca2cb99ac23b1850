//! Unit tests for ct-schedule.

use ct_core::{Container, ContainerNumber, GridPoint, SimDate, TransportType};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn date(h: u32, m: u32) -> SimDate {
    SimDate::from_ymd_hms(2004, 12, 1, h, m, 0).unwrap()
}

fn container(n: u32, arrival: SimDate) -> Container {
    Container {
        number:         ContainerNumber(n),
        arrival_type:   TransportType::Sea,
        arrival_date:   arrival,
        departure_type: TransportType::Road,
        departure_date: arrival.add_millis(86_400_000),
        spawn:          GridPoint::new(n as u16, 0, 0),
    }
}

// ── ContainerBacklog ──────────────────────────────────────────────────────────

#[cfg(test)]
mod backlog {
    use super::*;
    use crate::ContainerBacklog;

    #[test]
    fn empty() {
        let mut b = ContainerBacklog::new();
        assert!(b.is_empty());
        assert!(b.next_arrival().is_none());
        assert!(b.due(date(23, 0)).is_empty());
    }

    #[test]
    fn due_is_strictly_before_now() {
        let mut b: ContainerBacklog =
            [container(1, date(0, 10)), container(2, date(0, 20))].into_iter().collect();

        // Exactly at the arrival date: not yet due.
        assert!(b.due(date(0, 10)).is_empty());

        let due = b.due(date(0, 11));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].number, ContainerNumber(1));
        assert_eq!(b.len(), 1);
        assert_eq!(b.next_arrival(), Some(date(0, 20)));
    }

    #[test]
    fn never_returned_twice() {
        let mut b: ContainerBacklog = (1..=5).map(|n| container(n, date(0, n))).collect();
        let first = b.due(date(0, 3));
        let second = b.due(date(0, 3));
        assert_eq!(first.len(), 2);
        assert!(second.is_empty());

        let rest = b.due(date(1, 0));
        assert_eq!(rest.len(), 3);
        assert!(b.is_empty());
    }

    #[test]
    fn release_order_is_by_date_then_insertion() {
        let mut b = ContainerBacklog::new();
        b.push(container(3, date(0, 30)));
        b.push(container(1, date(0, 10)));
        b.push(container(2, date(0, 10)));

        let numbers: Vec<u32> = b.due(date(1, 0)).iter().map(|c| c.number.0).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn iter_does_not_consume() {
        let b: ContainerBacklog = (1..=3).map(|n| container(n, date(0, n))).collect();
        assert_eq!(b.iter().count(), 3);
        assert_eq!(b.len(), 3);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::*;
    use crate::{load_containers_csv, load_containers_reader, ScheduleError};

    const HEADER: &str = "number,arrival_date,arrival_type,departure_date,departure_type,x,y,z\n";

    #[test]
    fn loads_rows() {
        let csv = format!(
            "{HEADER}\
             1,2004-12-01 00:10,zeeschip,2004-12-03 08:00,trein,0,0,0\n\
             2,2004-12-01 00:05,sea,2004-12-02 12:30,road,1,2,3\n"
        );
        let mut b = load_containers_reader(Cursor::new(csv)).unwrap();
        assert_eq!(b.len(), 2);

        let all = b.due(date(23, 59));
        assert_eq!(all[0].number, ContainerNumber(2));
        assert_eq!(all[0].spawn, GridPoint::new(1, 2, 3));
        assert_eq!(all[1].arrival_type, TransportType::Sea);
        assert_eq!(all[1].departure_type, TransportType::Rail);
        assert_eq!(all[1].departure_date, SimDate::from_ymd_hms(2004, 12, 3, 8, 0, 0).unwrap());
    }

    #[test]
    fn empty_file_gives_empty_backlog() {
        let b = load_containers_reader(Cursor::new(HEADER)).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn bad_transport_type_reports_row() {
        let csv = format!(
            "{HEADER}\
             1,2004-12-01,sea,2004-12-02,road,0,0,0\n\
             2,2004-12-01,zeppelin,2004-12-02,road,0,0,0\n"
        );
        match load_containers_reader(Cursor::new(csv)) {
            Err(ScheduleError::Parse { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_rejected() {
        let csv = format!("{HEADER}1,2004-13-01,sea,2004-12-02,road,0,0,0\n");
        assert!(matches!(
            load_containers_reader(Cursor::new(csv)),
            Err(ScheduleError::Parse { .. })
        ));
    }

    #[test]
    fn duplicate_number_rejected() {
        let csv = format!(
            "{HEADER}\
             7,2004-12-01,sea,2004-12-02,road,0,0,0\n\
             7,2004-12-01,rail,2004-12-02,road,1,0,0\n"
        );
        assert!(matches!(
            load_containers_reader(Cursor::new(csv)),
            Err(ScheduleError::DuplicateContainer(ContainerNumber(7)))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_containers_csv(std::path::Path::new("/nonexistent/schedule.csv"));
        assert!(matches!(err, Err(ScheduleError::Io(_))));
    }
}
