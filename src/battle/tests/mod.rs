pub(crate) mod common;






#[cfg(test)]
mod test_stat_moves;

#[cfg(test)]
mod test_progression;
