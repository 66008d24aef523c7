use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

const CONFETTI: [char; 6] = ['*', '+', '✦', '✧', '•', '°'];
const GRAVITY: f64 = 15.0;
const LIFETIME: Duration = Duration::from_secs(3);

/// Headlines for a perfect solo round
pub const PERFECT_HEADLINES: [&str; 4] = ["PERFECT!", "FLAWLESS!", "WORD MASTER!", "BRILLIANT!"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SparkKind {
    /// Falls under gravity and fades out
    Confetti,
    /// Glides to a fixed cell to spell the headline
    Letter { target_x: f64, target_y: f64 },
}

#[derive(Debug, Clone)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    pub kind: SparkKind,
}

impl Spark {
    fn confetti<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *CONFETTI.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.0..3.0),
            kind: SparkKind::Confetti,
        }
    }

    fn letter<R: Rng + ?Sized>(symbol: char, target_x: f64, target_y: f64, rng: &mut R) -> Self {
        let x = target_x + rng.gen_range(-10.0..10.0);
        let y = target_y + rng.gen_range(-5.0..5.0);
        Self {
            x,
            y,
            vel_x: target_x - x,
            vel_y: target_y - y,
            symbol,
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: LIFETIME.as_secs_f64(),
            kind: SparkKind::Letter { target_x, target_y },
        }
    }

    /// Step the spark; false once it has burnt out
    fn update(&mut self, dt: f64) -> bool {
        match self.kind {
            SparkKind::Letter { target_x, target_y } => {
                let dist = ((target_x - self.x).powi(2) + (target_y - self.y).powi(2)).sqrt();
                if dist > 1.0 {
                    self.x += self.vel_x * dt;
                    self.y += self.vel_y * dt;
                    self.vel_x *= 0.95;
                    self.vel_y *= 0.95;
                } else {
                    self.x = target_x;
                    self.y = target_y;
                }
            }
            SparkKind::Confetti => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += GRAVITY * dt;
            }
        }
        self.age += dt;
        self.age < self.max_age
    }

    pub fn is_letter(&self) -> bool {
        matches!(self.kind, SparkKind::Letter { .. })
    }

    /// 1.0 when fresh, 0.0 when burnt out
    pub fn brightness(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Fireworks over the results screen
#[derive(Debug, Default)]
pub struct Celebration {
    pub sparks: Vec<Spark>,
    elapsed: Duration,
    active: bool,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn start(&mut self, headline: &str, width: u16, height: u16) {
        let mut rng = rand::thread_rng();
        self.sparks.clear();
        self.elapsed = Duration::ZERO;
        self.active = true;
        self.width = width as f64;
        self.height = height as f64;

        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;

        let spacing = 2.0;
        let span = (headline.chars().count().saturating_sub(1)) as f64 * spacing;
        let left = center_x - span / 2.0;
        for (i, ch) in headline.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            self.sparks.push(Spark::letter(
                ch,
                left + i as f64 * spacing,
                center_y - 2.0,
                &mut rng,
            ));
        }

        for _ in 0..25 {
            let x = center_x + rng.gen_range(-15.0..15.0);
            let y = center_y + rng.gen_range(-8.0..8.0);
            self.sparks.push(Spark::confetti(x, y, &mut rng));
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= LIFETIME {
            self.stop();
            return;
        }

        let step = dt.as_secs_f64();
        let (width, height) = (self.width, self.height);
        self.sparks.retain_mut(|spark| {
            let alive = spark.update(step);
            if spark.is_letter() {
                return alive;
            }
            let margin = 5.0;
            let off_screen = spark.y > height + margin || spark.x < -margin || spark.x > width + margin;
            alive && !off_screen
        });
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.sparks.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
