// Copyright 2025 the Lithos Engine authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use lithos_core::math::Vec3;
use lithos_core::physics::{
    BodyType, ColliderDesc, ColliderShape, PhysicsProvider, RigidBodyDesc, RigidBodyHandle,
};
use lithos_infra::physics::RapierPhysicsWorld;

fn dynamic_cube_at(world: &mut RapierPhysicsWorld, y: f32) -> RigidBodyHandle {
    let body = world.add_body(RigidBodyDesc {
        position: Vec3::new(0.0, y, 0.0),
        ..Default::default()
    });
    world.add_collider(ColliderDesc::attached(
        body,
        ColliderShape::Box(Vec3::new(0.5, 0.5, 0.5)),
    ));
    body
}

#[test]
fn test_gravity_pulls_dynamic_body_down() {
    let mut world = RapierPhysicsWorld::new();
    let body = dynamic_cube_at(&mut world, 10.0);

    for _ in 0..10 {
        world.step(1.0 / 60.0);
    }

    let (pos, _) = world.get_body_transform(body);
    assert!(
        pos.y < 10.0,
        "Body should have fallen under gravity, Y is {}",
        pos.y
    );
}

#[test]
fn test_body_lands_on_static_floor() {
    let mut world = RapierPhysicsWorld::new();

    let floor = world.add_body(RigidBodyDesc {
        position: Vec3::new(0.0, -0.5, 0.0),
        body_type: BodyType::Static,
        ..Default::default()
    });
    world.add_collider(ColliderDesc::attached(
        floor,
        ColliderShape::Box(Vec3::new(50.0, 0.5, 50.0)),
    ));
    let cube = dynamic_cube_at(&mut world, 5.0);

    // Long enough to fall, collide, and settle.
    for _ in 0..600 {
        world.step(1.0 / 60.0);
    }

    let (pos, _) = world.get_body_transform(cube);
    // Floor top is at y = 0, cube half-extent 0.5: it rests around y = 0.5.
    assert!(
        (pos.y - 0.5).abs() < 0.1,
        "Cube should rest on the floor, Y is {}",
        pos.y
    );
}

#[test]
fn test_settled_world_reports_no_active_bodies() {
    let mut world = RapierPhysicsWorld::new();

    let floor = world.add_body(RigidBodyDesc {
        position: Vec3::new(0.0, -0.5, 0.0),
        body_type: BodyType::Static,
        ..Default::default()
    });
    world.add_collider(ColliderDesc::attached(
        floor,
        ColliderShape::Box(Vec3::new(50.0, 0.5, 50.0)),
    ));
    let cube = dynamic_cube_at(&mut world, 2.0);

    assert!(world.has_active_bodies());
    assert!(world.is_body_active(cube));

    for _ in 0..1200 {
        world.step(1.0 / 60.0);
    }

    // Resting long enough puts the body to sleep, which gates the frame
    // loop's physics stepping.
    assert!(!world.is_body_active(cube));
    assert!(!world.has_active_bodies());
}

#[test]
fn test_static_only_world_is_inactive() {
    let mut world = RapierPhysicsWorld::new();
    let floor = world.add_body(RigidBodyDesc {
        body_type: BodyType::Static,
        ..Default::default()
    });
    world.add_collider(ColliderDesc::attached(
        floor,
        ColliderShape::Box(Vec3::new(10.0, 0.5, 10.0)),
    ));
    assert!(!world.has_active_bodies());
}

#[test]
fn test_removed_body_handle_stops_resolving() {
    let mut world = RapierPhysicsWorld::new();
    let body = dynamic_cube_at(&mut world, 3.0);

    world.remove_body(body);

    assert!(!world.is_body_active(body));
    let (pos, _) = world.get_body_transform(body);
    assert_eq!(pos, Vec3::ZERO);
}

#[test]
fn test_sphere_collider_bounces_with_restitution() {
    let mut world = RapierPhysicsWorld::new();

    let floor = world.add_body(RigidBodyDesc {
        position: Vec3::new(0.0, -0.5, 0.0),
        body_type: BodyType::Static,
        ..Default::default()
    });
    world.add_collider(ColliderDesc::attached(
        floor,
        ColliderShape::Box(Vec3::new(50.0, 0.5, 50.0)),
    ));

    let ball = world.add_body(RigidBodyDesc {
        position: Vec3::new(0.0, 4.0, 0.0),
        ..Default::default()
    });
    world.add_collider(ColliderDesc {
        restitution: 0.9,
        ..ColliderDesc::attached(ball, ColliderShape::Sphere(0.5))
    });

    let mut lowest = f32::MAX;
    let mut rebounded = false;
    for _ in 0..600 {
        world.step(1.0 / 60.0);
        let (pos, _) = world.get_body_transform(ball);
        if pos.y < lowest {
            lowest = pos.y;
        } else if pos.y > lowest + 0.5 {
            rebounded = true;
        }
    }
    assert!(rebounded, "Ball with restitution 0.9 should bounce back up");
}
