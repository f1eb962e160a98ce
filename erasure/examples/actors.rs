//! Erase actors while keeping their action types apart.

use erasure::{erase, Actor, AnyActor};
use tracing_subscriber::EnvFilter;

struct Swim;
struct Fly;

struct Toad;

impl Actor for Toad {
  type Action = Swim;

  fn act(&self, _: Swim) {
    println!("i can swim");
  }
}

struct Cheep;

impl Actor for Cheep {
  type Action = Swim;

  fn act(&self, _: Swim) {
    println!("blub blub");
  }
}

struct Birdo;

impl Actor for Birdo {
  type Action = Fly;

  fn act(&self, _: Fly) {
    println!("i can fly");
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let swimmers: Vec<AnyActor<Swim>> = erase![Toad, Cheep];
  for swimmer in &swimmers {
    swimmer.attack(Swim);
  }

  // a flyer has its own type; it cannot join the swimmers
  let flyer: AnyActor<Fly> = AnyActor::new(Birdo);
  flyer.attack(Fly);
}
