//! Platform компоненты: kinematic platform + waypoint route

use bevy::prelude::*;

use crate::error::MotionError;

/// Kinematic platform (moving platform)
///
/// Тело двигается прямой записью position/velocity, solver его не толкает
/// (Rapier `KinematicPositionBased`). Target живёт ровно один tick:
/// `drive_kinematic_platforms` забирает его через `take()`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KinematicPlatform {
    /// Куда переместиться в текущем tick (None → стоим на месте, velocity = 0)
    pub target: Option<Vec3>,
}

impl KinematicPlatform {
    /// Запросить перемещение на этот tick (последний вызов побеждает)
    pub fn request_move(&mut self, target: Vec3) {
        self.target = Some(target);
    }
}

/// Как route ведёт себя на последнем waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum RouteMode {
    /// A → B → C → A → ...
    #[default]
    Loop,
    /// A → B → C → B → A → ...
    PingPong,
}

/// Маршрут платформы по waypoints с постоянной скоростью
///
/// Каждый tick выдаёт следующий target для `KinematicPlatform`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlatformRoute {
    waypoints: Vec<Vec3>,
    /// Скорость вдоль маршрута (m/s)
    speed: f32,
    mode: RouteMode,
    /// Индекс waypoint, к которому едем
    next: usize,
    /// Для PingPong: едем по возрастанию индексов
    forward: bool,
}

impl PlatformRoute {
    pub fn new(waypoints: Vec<Vec3>, speed: f32, mode: RouteMode) -> Result<Self, MotionError> {
        if waypoints.is_empty() {
            return Err(MotionError::EmptyRoute);
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(MotionError::InvalidRouteSpeed(speed));
        }
        if let Some(bad) = waypoints.iter().find(|w| !w.is_finite()) {
            return Err(MotionError::NonFiniteTarget(*bad));
        }

        Ok(Self {
            waypoints,
            speed,
            mode,
            next: 0,
            forward: true,
        })
    }

    /// Waypoint, к которому сейчас едем
    pub fn current_waypoint(&self) -> Vec3 {
        self.waypoints[self.next]
    }

    /// Следующий target из позиции `current` за `dt`
    ///
    /// Не перелетаем waypoint: при прибытии возвращаем ровно его и переключаемся дальше.
    pub fn next_target(&mut self, current: Vec3, dt: f32) -> Result<Vec3, MotionError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(MotionError::InvalidTimestep(dt));
        }

        let waypoint = self.current_waypoint();
        let max_step = self.speed * dt;
        let to_waypoint = waypoint - current;

        if to_waypoint.length() <= max_step {
            self.advance();
            return Ok(waypoint);
        }

        Ok(current + to_waypoint.normalize() * max_step)
    }

    fn advance(&mut self) {
        let len = self.waypoints.len();
        if len < 2 {
            return;
        }

        match self.mode {
            RouteMode::Loop => {
                self.next = (self.next + 1) % len;
            }
            RouteMode::PingPong => {
                if self.forward && self.next + 1 == len {
                    self.forward = false;
                } else if !self.forward && self.next == 0 {
                    self.forward = true;
                }

                if self.forward {
                    self.next += 1;
                } else {
                    self.next -= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_route_rejected() {
        let err = PlatformRoute::new(vec![], 1.0, RouteMode::Loop).unwrap_err();
        assert_eq!(err, MotionError::EmptyRoute);
    }

    #[test]
    fn test_zero_speed_rejected() {
        let err = PlatformRoute::new(vec![Vec3::ZERO], 0.0, RouteMode::Loop).unwrap_err();
        assert_eq!(err, MotionError::InvalidRouteSpeed(0.0));
    }

    #[test]
    fn test_route_moves_at_speed() {
        let mut route = PlatformRoute::new(vec![Vec3::new(0.0, 0.0, 10.0)], 2.0, RouteMode::Loop).unwrap();

        let target = route.next_target(Vec3::ZERO, 0.5).unwrap();

        // 2 m/s * 0.5 s = 1 m вдоль Z
        assert_eq!(target, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_route_does_not_overshoot_waypoint() {
        let a = Vec3::ZERO;
        let b = Vec3::new(1.0, 0.0, 0.0);
        let mut route = PlatformRoute::new(vec![b, a], 10.0, RouteMode::Loop).unwrap();

        let target = route.next_target(Vec3::new(0.5, 0.0, 0.0), 1.0).unwrap();

        assert_eq!(target, b);
        assert_eq!(route.current_waypoint(), a);
    }

    #[test]
    fn test_ping_pong_reverses() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let mut route = PlatformRoute::new(points, 100.0, RouteMode::PingPong).unwrap();

        // 0 → 1 → 2 → 1 → 0 → 1
        let mut visited = Vec::new();
        let mut position = Vec3::ZERO;
        for _ in 0..6 {
            position = route.next_target(position, 1.0).unwrap();
            visited.push(position.x as i32);
        }

        assert_eq!(visited, vec![0, 1, 2, 1, 0, 1]);
    }

    #[test]
    fn test_loop_wraps() {
        let points = vec![Vec3::ZERO, Vec3::X];
        let mut route = PlatformRoute::new(points, 100.0, RouteMode::Loop).unwrap();

        let mut position = Vec3::ZERO;
        let mut visited = Vec::new();
        for _ in 0..4 {
            position = route.next_target(position, 1.0).unwrap();
            visited.push(position.x as i32);
        }

        assert_eq!(visited, vec![0, 1, 0, 1]);
    }
}
