#[cfg(test)]
mod test_greedy;

#[cfg(test)]
mod test_memo;


#[cfg(test)]
mod test_scenarios;
