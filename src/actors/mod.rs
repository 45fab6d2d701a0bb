mod partition_actor;
#[cfg(test)]
mod tests;

pub use partition_actor::PartitionActor;
