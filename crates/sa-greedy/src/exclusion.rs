use sa_hooks::HookSet;

/// Hooks within `distance` of `current` going around the boundary, `current`
/// included, in ascending index order.
pub fn exclusion_window(hooks: &HookSet, current: usize, distance: usize) -> Vec<usize> {
    (0..hooks.len())
        .filter(|&i| hooks.cyclic_distance(current, i) <= distance)
        .collect()
}

/// Hooks the greedy rule may connect `current` to, in ascending index order.
pub fn candidates(hooks: &HookSet, current: usize, distance: usize) -> Vec<usize> {
    (0..hooks.len())
        .filter(|&i| hooks.cyclic_distance(current, i) > distance)
        .collect()
}
