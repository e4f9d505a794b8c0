use timetable_client::error::ModelError;
use timetable_client::models::{
    Configuration, FacultyField, FacultyId, Institute, InstituteField, NewFaculty, Room, RoomField,
    SubjectField,
};

mod support;

#[test]
fn test_default_configuration_seeds_one_of_each() {
    let config = Configuration::new();

    assert_eq!(config.rooms.len(), 1);
    assert_eq!(config.faculties.len(), 1);
    assert_eq!(config.semesters.len(), 1);
    assert_eq!(config.semesters[0].number, 1);
    assert_eq!(config.semesters[0].sections, vec![String::new()]);
    assert_eq!(config.semesters[0].subjects.len(), 1);
    assert_eq!(config.faculties[0].max_hours, 18);
    assert_eq!(config.institute.periods_per_day, 6);
}

#[test]
fn test_removing_last_room_or_faculty_is_noop() {
    let config = Configuration::new();

    assert_eq!(config.remove_room(0), config);
    assert_eq!(config.remove_faculty(0), config);
}

#[test]
fn test_remove_room_by_index() {
    let config = Configuration::new()
        .add_room()
        .set_room(1, RoomField::Name("Lab 1".to_string()))
        .unwrap();

    let removed = config.remove_room(0);
    assert_eq!(removed.rooms.len(), 1);
    assert_eq!(removed.rooms[0].name, "Lab 1");

    // out of range leaves everything alone
    assert_eq!(config.remove_room(5), config);
}

#[test]
fn test_add_semester_is_above_every_existing_number() {
    let config = Configuration::new().add_semester().add_semester();
    assert_eq!(
        config.semesters.iter().map(|s| s.number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let removed = config.remove_semester(1);
    assert_eq!(
        removed.semesters.iter().map(|s| s.number).collect::<Vec<_>>(),
        vec![1, 3]
    );

    let added = removed.add_semester();
    assert_eq!(added.semesters.last().unwrap().number, 4);

    let seeded = added.semesters.last().unwrap();
    assert_eq!(seeded.sections.len(), 1);
    assert_eq!(seeded.subjects.len(), 1);
}

#[test]
fn test_add_semester_after_removing_all_starts_at_one() {
    let empty = Configuration::new().remove_semester(0);
    assert!(empty.semesters.is_empty());

    let config = empty.add_semester();
    assert_eq!(config.semesters[0].number, 1);
}

#[test]
fn test_setters_leave_the_original_untouched() {
    let original = Configuration::new();
    let updated = original
        .set_institute(InstituteField::Name("Sample Institute".to_string()))
        .unwrap()
        .add_section(0)
        .add_subject(0);

    assert_eq!(original.institute.name, "");
    assert_eq!(original.semesters[0].sections.len(), 1);
    assert_eq!(updated.institute.name, "Sample Institute");
    assert_eq!(updated.semesters[0].sections.len(), 2);
    assert_eq!(updated.semesters[0].subjects.len(), 2);
    assert_eq!(updated.rooms, original.rooms);
}

#[test]
fn test_institute_bounds_are_enforced() {
    let config = Configuration::new();

    let err = config.set_institute(InstituteField::WorkingDays(8)).unwrap_err();
    assert_eq!(
        err,
        ModelError::OutOfBounds {
            field: "working days",
            min: 1,
            max: 7,
            value: 8
        }
    );
    assert!(config.set_institute(InstituteField::PeriodsPerDay(0)).is_err());
    assert!(config.set_institute(InstituteField::PeriodsPerDay(9)).is_err());
    assert!(config.set_institute(InstituteField::PeriodDuration(29)).is_err());
    assert!(config.set_institute(InstituteField::PeriodDuration(121)).is_err());
    assert!(config.set_institute(InstituteField::TotalSemesters(0)).is_err());

    let ok = config.set_institute(InstituteField::PeriodDuration(45)).unwrap();
    assert_eq!(ok.institute.period_duration, 45);
}

#[test]
fn test_faculty_max_hours_must_be_positive() {
    let config = Configuration::new();

    assert!(config.set_faculty(0, FacultyField::MaxHours(0)).is_err());
    let ok = config.set_faculty(0, FacultyField::MaxHours(12)).unwrap();
    assert_eq!(ok.faculties[0].max_hours, 12);
}

#[test]
fn test_setter_index_out_of_range() {
    let config = Configuration::new();

    assert_eq!(
        config.set_subject(0, 3, SubjectField::IsLab(true)).unwrap_err(),
        ModelError::IndexOutOfRange { collection: "subject", index: 3 }
    );
    assert_eq!(
        config.set_section(2, 0, "A").unwrap_err(),
        ModelError::IndexOutOfRange { collection: "semester", index: 2 }
    );
    assert!(config.set_room(1, RoomField::IsLab(true)).is_err());
}

#[test]
fn test_renaming_faculty_keeps_subject_reference() {
    let config = support::math_configuration();
    let id = config.faculties[0].id;

    let renamed = config
        .set_faculty(0, FacultyField::Name("Dr. Y".to_string()))
        .unwrap();

    assert_eq!(renamed.semesters[0].subjects[0].faculty, Some(id));
    assert_eq!(renamed.faculty(id).unwrap().name, "Dr. Y");
    assert!(renamed.faculty_by_name("Dr. X").is_none());
}

#[test]
fn test_faculty_ids_are_never_reused() {
    let config = Configuration::new().add_faculty();
    assert_eq!(config.faculties[1].id, FacultyId(2));

    let config = config.remove_faculty(1).add_faculty();
    assert_eq!(config.faculties[1].id, FacultyId(3));
}

#[test]
fn test_hydrate_base_replaces_base_and_keeps_semesters() {
    let config = support::math_configuration();
    let institute = Institute {
        name: "Saved".to_string(),
        ..Institute::default()
    };
    let rooms = vec![Room {
        name: "Lab 1".to_string(),
        is_lab: true,
    }];
    let faculties = vec![
        NewFaculty {
            name: "A".to_string(),
            emp_id: "E1".to_string(),
            max_hours: 10,
        },
        NewFaculty {
            name: "B".to_string(),
            emp_id: "E2".to_string(),
            max_hours: 12,
        },
    ];

    let hydrated = config.hydrate_base(institute.clone(), rooms.clone(), faculties);

    assert_eq!(hydrated.institute, institute);
    assert_eq!(hydrated.rooms, rooms);
    assert_eq!(hydrated.faculties.len(), 2);
    assert_ne!(hydrated.faculties[0].id, hydrated.faculties[1].id);
    assert_eq!(hydrated.semesters, config.semesters);
    assert!(!hydrated.same_base(&config));
}
