use rand::Rng;


/// Rows drawn from a tiny value pool so that duplicates are common.
pub fn repetitive_rows(count: usize, width: usize) -> Vec<Vec<f64>> {
    const POOL: [f64; 4] = [0.0, 1.0, -2.5, 1e300];
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            (0..width)
                .map(|_| POOL[rng.gen_range(0..POOL.len())])
                .collect()
        })
        .collect()
}
