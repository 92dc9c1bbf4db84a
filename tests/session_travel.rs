mod common;

use lucanis::PlayerLocation;

#[test]
fn new_game_starts_on_the_overworld() {
    let session = common::new_session(42);
    assert_eq!(session.location(), PlayerLocation::Overworld { point: 0 });
    assert!(session.characters_here().is_empty());
    assert!(session.ledger().is_empty());
    assert_eq!(session.world().maps.len(), 5);
}

#[test]
fn enter_walk_and_leave_a_location() {
    let mut session = common::new_session(42);

    assert_eq!(session.enter_location(), Some(0));
    assert_eq!(session.location(), PlayerLocation::Local { map: 0, point: 0 });
    assert!(session.enter_location().is_none(), "already inside a map");

    let here = session.characters_here();
    assert!((2..=7).contains(&here.len()));
    assert_eq!(here, session.world().maps[0].roster(0));

    let last = session.current_layout().point_count() - 1;
    let path = session.travel_to(last).unwrap();
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&last));
    assert_eq!(session.location(), PlayerLocation::Local { map: 0, point: last });

    assert!(session.travel_to(last + 100).is_none());
    assert_eq!(session.point(), last);

    assert!(session.leave_location());
    assert_eq!(session.location(), PlayerLocation::Overworld { point: 0 });
    assert!(!session.leave_location());
}

#[test]
fn only_linked_overworld_points_have_a_map() {
    let mut session = common::new_session(9);
    let maps = session.world().maps.len();
    let overworld_points = session.world().overworld.layout.point_count();
    assert!(overworld_points > maps);

    session.travel_to(maps).unwrap();
    assert!(session.enter_location().is_none());

    session.travel_to(maps - 1).unwrap();
    assert_eq!(session.enter_location(), Some(maps - 1));
    assert_eq!(
        session.world().overworld.points_data[maps - 1].name,
        session.world().maps[maps - 1].name
    );
}

#[test]
fn find_path_uses_the_current_map() {
    let mut session = common::new_session(5);
    let overworld_points = session.world().overworld.layout.point_count();
    assert!(session.find_path(0, overworld_points - 1).is_some());

    session.enter_location();
    let local_points = session.current_layout().point_count();
    assert!(session.find_path(0, local_points - 1).is_some());
    assert!(session.find_path(0, local_points).is_none());
}
